//! Display and Debug implementations for objects

use std::fmt;

use super::*;

impl fmt::Display for NativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeValue::Int(n) => write!(f, "{}", n),
            NativeValue::Bool(b) => write!(f, "{}", b),
            NativeValue::Text(s) => write!(f, "'{}'", s.escape_default()),
        }
    }
}

/// Renders objects in literal syntax. Parents are not shown.
impl fmt::Display for SelfObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(value) = &self.wrapped {
            return write!(f, "{}", value);
        }
        let (open, close) = if self.block { ("[", "]") } else { ("(", ")") };
        write!(f, "{}", open)?;
        if !self.slots.is_empty() {
            write!(f, " |")?;
            for (i, (name, slot)) in self.slots.iter().enumerate() {
                if i > 0 {
                    write!(f, ".")?;
                }
                match slot {
                    Slot::Argument => write!(f, " :{}", name)?,
                    Slot::Data(value) => write!(f, " {} = {}", name, value)?,
                }
            }
            write!(f, " |")?;
        }
        if let Some(body) = &self.body {
            write!(f, " {}", body)?;
        }
        write!(f, " {}", close)
    }
}

impl fmt::Debug for SelfObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("SelfObject");
        s.field("slots", &self.slots.keys().collect::<Vec<_>>());
        if let Some(value) = &self.wrapped {
            s.field("wrapped", value);
        }
        if let Some(body) = &self.body {
            s.field("body", body);
        }
        s.field("block", &self.block)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}
