//! Indented outline of a lowered schema, for `pdlc ast`.

use std::fmt::Write;

use super::{Descriptor, DescriptorKind, Schema};

/// ANSI color palette; empty strings when disabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    pub blue: &'static str,
    pub green: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        blue: "\x1b[34m",
        green: "\x1b[32m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        blue: "",
        green: "",
        dim: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.blue.is_empty()
    }
}

pub struct SchemaPrinter<'s> {
    schema: &'s Schema,
    colors: Colors,
}

impl<'s> SchemaPrinter<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            colors: Colors::OFF,
        }
    }

    pub fn colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let c = self.colors;
        if let Some(base) = &self.schema.base {
            writeln!(w, "{}inherits{} {base}", c.green, c.reset)?;
        }
        for descriptor in &self.schema.entries {
            self.format_descriptor(descriptor, 0, w)?;
        }
        Ok(())
    }

    fn format_descriptor(
        &self,
        descriptor: &Descriptor,
        indent: usize,
        w: &mut impl Write,
    ) -> std::fmt::Result {
        let c = self.colors;
        let prefix = "  ".repeat(indent);
        write!(
            w,
            "{prefix}{}{}{} {}{}{}",
            c.blue,
            descriptor.name,
            c.reset,
            c.green,
            descriptor.parameter_kind(),
            c.reset
        )?;

        match &descriptor.kind {
            DescriptorKind::Bool(value) => write!(w, " {value}")?,
            DescriptorKind::Int(value) => write!(w, " {value}")?,
            DescriptorKind::Double(value) => write!(w, " {value:?}")?,
            DescriptorKind::Vector([x, y, z]) => write!(w, " ({x:?} {y:?} {z:?})")?,
            DescriptorKind::String(value) | DescriptorKind::Path(value) => {
                write!(w, " {value:?}")?
            }
            DescriptorKind::Selection { items, default } => {
                write!(w, " ({}) = {}", items.join(" "), items[*default])?
            }
            DescriptorKind::SelectableSubset {
                alternatives,
                default,
            } => write!(w, " = {}", alternatives[*default].tag)?,
            DescriptorKind::Array { len, .. } => write!(w, " * {len}")?,
            DescriptorKind::Matrix { rows, cols } => write!(w, " {rows}x{cols}")?,
            DescriptorKind::IncludedSet(path) => write!(w, " {path}")?,
            DescriptorKind::DoubleRange(values) => {
                let values: Vec<String> = values.iter().map(|v| format!("{v:?}")).collect();
                write!(w, " ({})", values.join(" "))?
            }
            DescriptorKind::Subset(_) => {}
        }

        self.format_trailer(descriptor, w)?;
        writeln!(w)?;

        match &descriptor.kind {
            DescriptorKind::Subset(entries) => {
                for child in entries {
                    self.format_descriptor(child, indent + 1, w)?;
                }
            }
            DescriptorKind::SelectableSubset { alternatives, .. } => {
                let alt_prefix = "  ".repeat(indent + 1);
                for alt in alternatives {
                    write!(w, "{alt_prefix}{}{}{}", c.blue, alt.tag, c.reset)?;
                    if !alt.description.is_empty() {
                        write!(w, " {}{:?}{}", c.dim, alt.description, c.reset)?;
                    }
                    writeln!(w)?;
                    for child in &alt.entries {
                        self.format_descriptor(child, indent + 2, w)?;
                    }
                }
            }
            DescriptorKind::Array { element, .. } => {
                self.format_descriptor(element, indent + 1, w)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn format_trailer(&self, descriptor: &Descriptor, w: &mut impl Write) -> std::fmt::Result {
        let c = self.colors;
        if !descriptor.description.is_empty() {
            write!(w, " {}{:?}{}", c.dim, descriptor.description, c.reset)?;
        }
        let flags = descriptor.flags;
        for (set, name) in [
            (flags.necessary, "necessary"),
            (flags.expert, "expert"),
            (flags.hidden, "hidden"),
        ] {
            if set {
                write!(w, " *{name}")?;
            }
        }
        Ok(())
    }
}
