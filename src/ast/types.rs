use std::fmt::Display;

/// The closed set of static types.
///
/// `Any` is the top type. Lists are covariant in their element type;
/// functions are contravariant in the parameter and covariant in the
/// return type. There is no implicit coercion between any pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Number,
    Boolean,
    Text,
    Any,
    List(Box<Type>),
    Function(Box<Type>, Box<Type>),
}

impl Type {
    pub fn list(element: Type) -> Type {
        Type::List(Box::new(element))
    }

    pub fn function(parameter: Type, ret: Type) -> Type {
        Type::Function(Box::new(parameter), Box::new(ret))
    }

    /// The structural subtyping relation. Reflexive; every type is a
    /// subtype of `Any`; no other pairs are related unless equal.
    pub fn is_subtype_of(&self, other: &Type) -> bool {
        match (self, other) {
            (_, Type::Any) => true,
            (Type::Number, Type::Number) => true,
            (Type::Boolean, Type::Boolean) => true,
            (Type::Text, Type::Text) => true,
            (Type::List(element), Type::List(other_element)) => {
                element.is_subtype_of(other_element)
            }
            (Type::Function(parameter, ret), Type::Function(other_parameter, other_ret)) => {
                other_parameter.is_subtype_of(parameter) && ret.is_subtype_of(other_ret)
            }
            _ => false,
        }
    }

    /// Whether the two types are subtype-related in either direction.
    /// This is the compatibility test used by the equality operators
    /// and by conditional branch merging.
    pub fn is_compatible_with(&self, other: &Type) -> bool {
        self.is_subtype_of(other) || other.is_subtype_of(self)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Number => write!(f, "Number"),
            Type::Boolean => write!(f, "Boolean"),
            Type::Text => write!(f, "Text"),
            Type::Any => write!(f, "Any"),
            Type::List(element) => write!(f, "[{}]", element),
            Type::Function(parameter, ret) => write!(f, "({}) -> {}", parameter, ret),
        }
    }
}
