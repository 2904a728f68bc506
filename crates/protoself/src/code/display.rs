//! Display and Debug implementations for Code

use std::fmt;

use super::Code;

/// Renders code back in source syntax, parenthesizing every binary send.
impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Code::Constant(value) => write!(f, "{}", value),
            Code::SelfRef => write!(f, "self"),
            Code::Message {
                receiver,
                selector,
                args,
            } => {
                let implicit = matches!(receiver.as_ref(), Code::SelfRef);
                if selector.is_keyword() {
                    if !implicit {
                        write!(f, "{} ", receiver)?;
                    }
                    for (i, (part, arg)) in selector.parts().iter().zip(args).enumerate() {
                        if i > 0 {
                            write!(f, " ")?;
                        }
                        write!(f, "{} {}", part, arg)?;
                    }
                    Ok(())
                } else if selector.is_operator() {
                    write!(f, "({} {}", receiver, selector)?;
                    for arg in args {
                        write!(f, " {}", arg)?;
                    }
                    write!(f, ")")
                } else if implicit {
                    write!(f, "{}", selector)
                } else {
                    write!(f, "{} {}", receiver, selector)
                }
            }
            Code::Block(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ". ")?;
                    }
                    write!(f, "{}", child)?;
                }
                Ok(())
            }
            Code::Native(_) => write!(f, "<primitive>"),
            Code::Argument(index) => write!(f, "<argument {}>", index),
        }
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Code::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Code::SelfRef => write!(f, "SelfRef"),
            Code::Message {
                receiver,
                selector,
                args,
            } => f
                .debug_struct("Message")
                .field("receiver", receiver)
                .field("selector", selector)
                .field("args", args)
                .finish(),
            Code::Block(children) => f.debug_tuple("Block").field(children).finish(),
            Code::Native(_) => write!(f, "Native"),
            Code::Argument(index) => f.debug_tuple("Argument").field(index).finish(),
        }
    }
}
