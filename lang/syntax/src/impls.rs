use crate::*;
use std::fmt;

macro_rules! impl_name {
    ($name:ident) => {
        impl $name {
            pub fn plain(&self) -> &str {
                let $name(name) = self;
                name
            }
        }
        impl<T: AsRef<str>> From<T> for $name {
            fn from(name: T) -> Self {
                $name(name.as_ref().to_string())
            }
        }
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.plain())
            }
        }
    };
}

impl_name!(VarName);
impl_name!(CtorName);
impl_name!(ConstName);

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            | Literal::String(s) => write!(f, "{:?}", s),
        }
    }
}
