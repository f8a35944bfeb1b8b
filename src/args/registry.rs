//! Flag registry — the archiver flags the classifier needs to know about.
//!
//! Anything starting with `-` that is not listed here is passed through
//! untouched; the archiver itself rejects flags it does not understand.

/// How the wrapper handles a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagBehavior {
    /// The value names a file whose lines are input files.
    FileList,
    /// Forwarded to the archiver as-is.
    Passthrough,
}

/// Whether a flag takes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagArity {
    /// Boolean flag, no value (e.g., -static).
    NoValue,
    /// Consumes exactly the next token (e.g., -o <output>).
    RequiresValue,
}

/// A single flag definition.
#[derive(Debug, Clone)]
pub struct FlagDef {
    /// Flag as written on the command line (e.g., "-arch_only").
    pub name: &'static str,
    /// Does it take a value?
    pub arity: FlagArity,
    /// How the wrapper handles it.
    pub behavior: FlagBehavior,
    /// Human-readable description (for warnings).
    pub description: &'static str,
}

/// Build the complete flag registry.
pub fn flag_registry() -> Vec<FlagDef> {
    vec![
        // === Indirection ===
        FlagDef {
            name: "-filelist",
            arity: FlagArity::RequiresValue,
            behavior: FlagBehavior::FileList,
            description: "File listing one input file per line",
        },
        // === Single-value flags ===
        FlagDef {
            name: "-arch_only",
            arity: FlagArity::RequiresValue,
            behavior: FlagBehavior::Passthrough,
            description: "Only operate on the given architecture",
        },
        FlagDef {
            name: "-syslibroot",
            arity: FlagArity::RequiresValue,
            behavior: FlagBehavior::Passthrough,
            description: "Prefix for library search paths",
        },
        FlagDef {
            name: "-o",
            arity: FlagArity::RequiresValue,
            behavior: FlagBehavior::Passthrough,
            description: "Output archive path",
        },
        // === Common boolean flags ===
        FlagDef {
            name: "-static",
            arity: FlagArity::NoValue,
            behavior: FlagBehavior::Passthrough,
            description: "Produce a static library",
        },
        FlagDef {
            name: "-D",
            arity: FlagArity::NoValue,
            behavior: FlagBehavior::Passthrough,
            description: "Deterministic mode (zero timestamps and ids)",
        },
        FlagDef {
            name: "-no_warning_for_no_symbols",
            arity: FlagArity::NoValue,
            behavior: FlagBehavior::Passthrough,
            description: "Silence the empty table of contents warning",
        },
    ]
}

impl FlagDef {
    /// Check if this definition matches the given argument string.
    pub fn matches(&self, arg: &str) -> bool {
        arg == self.name
    }

    /// Whether the classifier must pull the following token along with this flag.
    pub fn takes_value(&self) -> bool {
        self.arity == FlagArity::RequiresValue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_value_flags_take_value() {
        let registry = flag_registry();
        for name in ["-arch_only", "-syslibroot", "-o"] {
            let def = registry.iter().find(|d| d.matches(name)).unwrap();
            assert!(def.takes_value(), "{name} should take a value");
            assert_eq!(def.behavior, FlagBehavior::Passthrough);
        }
    }

    #[test]
    fn filelist_is_indirection() {
        let registry = flag_registry();
        let def = registry.iter().find(|d| d.matches("-filelist")).unwrap();
        assert_eq!(def.behavior, FlagBehavior::FileList);
        assert!(def.takes_value());
    }

    #[test]
    fn matching_is_exact() {
        let registry = flag_registry();
        assert!(!registry.iter().any(|d| d.matches("-output")));
        assert!(!registry.iter().any(|d| d.matches("o")));
    }
}
