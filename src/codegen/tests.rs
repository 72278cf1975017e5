// Licensed under the Apache-2.0 license

//! Tests for the generation driver and backend emitters.

mod test {
    use std::io::Write as _;
    use std::path::Path;

    use crate::config::{Backend, GenConfig, LoadedConfig};
    use crate::descriptor::FieldDescriptor;
    use crate::error::GenError;
    use crate::{FunctionFilter, Generator};

    fn config(backend: Backend) -> GenConfig {
        GenConfig {
            struct_name: "uart_regs".to_string(),
            var_name: "dev".to_string(),
            backend,
        }
    }

    fn uart_descriptors() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("uart", "ctrl", "enable", 3, 1).unwrap(),
            FieldDescriptor::new("uart", "ctrl", "parity", 4, 2).unwrap(),
            FieldDescriptor::new("uart", "status", "busy", 0, 1).unwrap(),
        ]
    }

    fn generator(backend: Backend) -> Generator {
        Generator::new(config(backend), uart_descriptors())
    }

    /// Names of all emitted functions, in emission order.
    fn function_names(code: &str) -> Vec<String> {
        code.lines()
            .filter(|l| l.starts_with("static inline"))
            .map(|l| {
                l.split('(')
                    .next()
                    .unwrap()
                    .split_whitespace()
                    .last()
                    .unwrap()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_uart_example_constants() {
        let code = generator(Backend::Direct).emit_constants();
        println!("constants:\n{}", code);
        assert!(code.contains("#define UART_CTRL_ENABLE_OFST (3)"));
        assert!(code.contains("#define UART_CTRL_ENABLE_MASK (1 << UART_CTRL_ENABLE_OFST)"));
        // Two-bit field at bit 4: mask value 0b11
        assert!(code.contains("#define UART_CTRL_PARITY_OFST (4)"));
        assert!(code.contains("#define UART_CTRL_PARITY_MASK (3 << UART_CTRL_PARITY_OFST)"));
    }

    #[test]
    fn test_constants_follow_descriptor_order() {
        let code = generator(Backend::Direct).emit_constants();
        let enable = code.find("UART_CTRL_ENABLE_OFST").unwrap();
        let parity = code.find("UART_CTRL_PARITY_OFST").unwrap();
        let busy = code.find("UART_STATUS_BUSY_OFST").unwrap();
        assert!(enable < parity && parity < busy);
    }

    #[test]
    fn test_constants_are_restartable() {
        let generator = generator(Backend::MappedIo);
        assert_eq!(generator.emit_constants(), generator.emit_constants());
    }

    #[test]
    fn test_direct_accessors() {
        let code = generator(Backend::Direct).emit_functions(None);
        println!("direct:\n{}", code);
        assert!(code.contains(
            "static inline uint8_t get_uart_ctrl_enable(volatile struct uart_regs *dev) {"
        ));
        assert!(code.contains("    return (dev->ctrl & UART_CTRL_ENABLE_MASK) >> UART_CTRL_ENABLE_OFST;"));
        assert!(code.contains("    dev->ctrl |= UART_CTRL_ENABLE_MASK;"));
        assert!(code.contains("    dev->ctrl &= ~UART_CTRL_ENABLE_MASK;"));
        // No mapped-I/O primitives in direct output
        assert!(!code.contains("ioread8"));
        assert!(!code.contains("iowrite8"));
    }

    #[test]
    fn test_mapped_io_accessors() {
        let code = generator(Backend::MappedIo).emit_functions(None);
        println!("mapped-io:\n{}", code);
        assert!(code.contains(
            "static inline uint8_t get_uart_ctrl_enable(__iomem struct uart_regs *dev) {"
        ));
        assert!(code
            .contains("\treturn (ioread8(&dev->ctrl) & UART_CTRL_ENABLE_MASK) >> UART_CTRL_ENABLE_OFST;"));
        // Modified value is computed in a local before the store
        assert!(code.contains("\tuint8_t new_value = ioread8(&dev->ctrl) | UART_CTRL_ENABLE_MASK;"));
        assert!(code.contains("\tuint8_t new_value = ioread8(&dev->ctrl) & ~UART_CTRL_ENABLE_MASK;"));
        assert!(code.contains("\tiowrite8(new_value, &dev->ctrl);"));
        // No direct volatile dereference in mapped-I/O output
        assert!(!code.contains("volatile"));
    }

    #[test]
    fn test_backends_emit_identical_names() {
        let direct = generator(Backend::Direct).emit_functions(None);
        let mapped = generator(Backend::MappedIo).emit_functions(None);
        let names = function_names(&direct);
        assert_eq!(names, function_names(&mapped));
        // get, set, unset per descriptor, in that order
        assert_eq!(
            &names[..3],
            &[
                "get_uart_ctrl_enable",
                "set_uart_ctrl_enable",
                "unset_uart_ctrl_enable"
            ]
        );
        assert_eq!(names.len(), 9);
    }

    #[test]
    fn test_function_filter() {
        let filter = FunctionFilter::new("ctrl", ["enable"]);
        let code = generator(Backend::Direct).emit_functions(Some(&filter));
        assert_eq!(
            function_names(&code),
            [
                "get_uart_ctrl_enable",
                "set_uart_ctrl_enable",
                "unset_uart_ctrl_enable"
            ]
        );
        assert!(!code.contains("parity"));
        assert!(!code.contains("busy"));
    }

    #[test]
    fn test_function_filter_requires_register_match() {
        // "busy" exists, but on the status register
        let filter = FunctionFilter::new("ctrl", ["busy"]);
        let code = generator(Backend::Direct).emit_functions(Some(&filter));
        assert_eq!(code, "");
    }

    #[test]
    fn test_empty_filter_set_yields_empty_output() {
        let filter = FunctionFilter::new("ctrl", Vec::<String>::new());
        let code = generator(Backend::Direct).emit_functions(Some(&filter));
        assert_eq!(code, "");
    }

    #[test]
    fn test_emit_all_ordering() {
        let mut prelude = tempfile::NamedTempFile::new().unwrap();
        writeln!(prelude, "#include <stdint.h>").unwrap();
        prelude.flush().unwrap();

        let code = generator(Backend::Direct)
            .emit_all(Some(prelude.path()))
            .unwrap();
        println!("all:\n{}", code);

        let include = code.find("#include <stdint.h>").unwrap();
        let first_define = code.find("#define").unwrap();
        let first_fn = code.find("static inline").unwrap();
        assert!(include < first_define);
        assert!(first_define < first_fn);
        // All defines come before all functions (no interleaving)
        let last_define = code.rfind("#define").unwrap();
        assert!(last_define < first_fn);
    }

    #[test]
    fn test_emit_all_without_prelude() {
        let code = generator(Backend::Direct).emit_all(None).unwrap();
        assert!(code.starts_with("#define UART_CTRL_ENABLE_OFST (3)"));
    }

    #[test]
    fn test_unreadable_prelude_fails_before_output() {
        let err = generator(Backend::Direct)
            .emit_all(Some(Path::new("/nonexistent/prelude.h")))
            .unwrap_err();
        assert!(matches!(err, GenError::PreludeUnreadable { .. }));
    }

    #[test]
    fn test_end_to_end_from_config_text() {
        let loaded = LoadedConfig::parse(
            r#"
            {
                "struct_name": "i3c_regs",
                "var_name": "regs",
                "gen_type": "linux",
                "ofst_mask": [
                    ["i3c", "queue", "full", 7, 1],
                    ["i3c", "queue", "depth"]
                ]
            }
            "#,
        )
        .unwrap();
        let generator = Generator::new(loaded.config, loaded.descriptors);
        let code = generator.emit_all(None).unwrap();
        assert!(code.contains("#define I3C_QUEUE_FULL_OFST (7)"));
        assert!(code.contains("get_i3c_queue_full(__iomem struct i3c_regs *regs)"));
        // The placeholder row produces neither constants nor functions
        assert!(!code.contains("DEPTH"));
        assert!(!code.contains("depth"));
    }
}
