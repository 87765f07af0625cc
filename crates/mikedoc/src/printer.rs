//! Terminal printer for the documentation model
//!
//! Prints each module with its members, and for classes the resolved members
//! with their lineage. Colors go through `termcolor`, so the same code
//! writes to a terminal or to a plain buffer.
//!
//! # Example
//!
//! ```no_run
//! use mikedoc::printer::DocPrinter;
//! use mikedoc::module::ModuleDescriptor;
//!
//! let modules: Vec<ModuleDescriptor> = vec![];
//! DocPrinter::new(&modules, true).print_to_stdout();
//! ```

use crate::class::{ClassDescriptor, ClassMemberDescriptor, ClassMemberKind};
use crate::member::{MemberDescriptor, MemberKind};
use crate::module::ModuleDescriptor;
use crate::utils::text::short_description;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

const SUMMARY_LEN: usize = 72;

/// Terminal documentation printer
pub struct DocPrinter<'a, 'r> {
    modules: &'a [ModuleDescriptor<'r>],
    use_color: bool,
}

impl<'a, 'r> DocPrinter<'a, 'r> {
    /// Create a new printer
    pub fn new(modules: &'a [ModuleDescriptor<'r>], use_color: bool) -> Self {
        Self { modules, use_color }
    }

    /// Print directly to stdout
    pub fn print_to_stdout(&self) {
        let choice = if self.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        if let Err(e) = self.write_to(&mut stdout) {
            tracing::error!("error printing documentation: {}", e);
        }
    }

    /// Write every module to a `WriteColor` implementor
    pub fn write_to<W: WriteColor>(&self, w: &mut W) -> io::Result<()> {
        for module in self.modules {
            self.write_module(w, module)?;
            writeln!(w)?;
        }
        Ok(())
    }

    fn write_module<W: WriteColor>(&self, w: &mut W, module: &ModuleDescriptor<'_>) -> io::Result<()> {
        w.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(w, "module")?;
        w.reset()?;
        writeln!(w, " {}", module.name)?;
        self.write_summary(w, module.docstring.description_or(""), 1)?;

        if module.is_empty() {
            self.write_dimmed(w, "(no members)", 1)?;
        }
        for member in &module.members {
            self.write_member(w, member)?;
        }
        Ok(())
    }

    fn write_member<W: WriteColor>(&self, w: &mut W, member: &MemberDescriptor<'_>) -> io::Result<()> {
        write!(w, "  ")?;
        self.write_keyword(w, member.kind.display())?;
        write!(w, " {}", member.name)?;

        match &member.kind {
            MemberKind::Field => {
                if let Some(value) = member.value() {
                    write!(w, " = {}", value)?;
                }
                writeln!(w)?;
            }
            MemberKind::Callable => {
                writeln!(w, "{}", member.signature().unwrap_or("(...)"))?;
                self.write_summary(w, member.docstring.description_or(""), 2)?;
            }
            MemberKind::Class(class) => {
                writeln!(w, "{}", member.signature().unwrap_or_default())?;
                self.write_summary(w, member.docstring.description_or(""), 2)?;
                self.write_class(w, class)?;
            }
        }
        Ok(())
    }

    fn write_class<W: WriteColor>(&self, w: &mut W, class: &ClassDescriptor<'_>) -> io::Result<()> {
        if !class.bases.is_empty() {
            let bases: Vec<_> = class.bases.iter().map(|b| b.display_name()).collect();
            self.write_dimmed(w, &format!("bases: {}", bases.join(", ")), 2)?;
        }
        for constant in class.constants() {
            writeln!(w, "    {} = {}", constant.name, constant.value)?;
        }
        for field in class.record_fields() {
            writeln!(w, "    {}", field.name)?;
        }
        for member in &class.members {
            self.write_class_member(w, member)?;
        }
        Ok(())
    }

    fn write_class_member<W: WriteColor>(
        &self,
        w: &mut W,
        member: &ClassMemberDescriptor<'_>,
    ) -> io::Result<()> {
        write!(w, "    ")?;
        self.write_keyword(w, member.kind.display())?;
        write!(w, " {}", member.name)?;

        match member.kind {
            ClassMemberKind::Field => {
                if let Some(value) = member.symbol.value.as_deref() {
                    write!(w, " = {}", value)?;
                }
            }
            ClassMemberKind::Property(accessors) => {
                write!(w, " [{}]", accessors.names().join(", "))?;
            }
            ClassMemberKind::Method(_) => {
                write!(w, "{}", member.signature.unwrap_or("(...)"))?;
            }
        }

        if !member.lineage.is_empty() {
            let lineage: Vec<_> = member.lineage.iter().map(|t| t.name.as_str()).collect();
            w.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
            write!(w, "  <- {}", lineage.join(" <- "))?;
            w.reset()?;
        }
        writeln!(w)
    }

    fn write_keyword<W: WriteColor>(&self, w: &mut W, keyword: &str) -> io::Result<()> {
        w.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(w, "{}", keyword)?;
        w.reset()
    }

    fn write_summary<W: WriteColor>(&self, w: &mut W, description: &str, indent: usize) -> io::Result<()> {
        let summary = short_description(description, SUMMARY_LEN);
        if summary.is_empty() {
            return Ok(());
        }
        self.write_dimmed(w, &summary, indent)
    }

    fn write_dimmed<W: WriteColor>(&self, w: &mut W, text: &str, indent: usize) -> io::Result<()> {
        w.set_color(ColorSpec::new().set_fg(Some(Color::White)).set_italic(true))?;
        write!(w, "{}{}", "  ".repeat(indent), text)?;
        w.reset()?;
        writeln!(w)
    }
}

impl Display for DocPrinter<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut buffer = NoColor::new(Vec::new());
        self.write_to(&mut buffer).map_err(|_| std::fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&buffer.into_inner()))
    }
}
