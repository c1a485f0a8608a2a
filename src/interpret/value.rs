use derive_more::Display;

/// Runtime value. Equality is structural: values of different kinds are never
/// equal and numbers compare with IEEE `==`.
#[derive(Display, Debug, Clone, PartialEq)]
pub enum Value {
    #[display("nil")]
    Nil,

    #[display("{_0}")]
    Bool(bool),

    // f64 display already drops a trailing ".0"
    #[display("{_0}")]
    Number(f64),

    // quoted so that the string "nil" does not look like nil
    #[display("{_0:?}")]
    Str(String),
}

impl Value {
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    pub fn get_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Nil, false)]
    #[case(Value::Bool(false), false)]
    #[case(Value::Bool(true), true)]
    #[case(Value::Number(0.0), true)]
    #[case(Value::Str(String::new()), true)]
    fn truthiness(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(value.is_truthy(), expected);
    }

    #[rstest]
    #[case(Value::Nil, Value::Nil, true)]
    #[case(Value::Nil, Value::Bool(false), false)]
    #[case(Value::Number(1.0), Value::Str("1".to_string()), false)]
    #[case(Value::Str("ab".to_string()), Value::Str("ab".to_string()), true)]
    #[case(Value::Number(f64::NAN), Value::Number(f64::NAN), false)]
    fn equality(#[case] lhs: Value, #[case] rhs: Value, #[case] expected: bool) {
        assert_eq!(lhs == rhs, expected);
    }

    #[test]
    fn display_for_printing() {
        assert_eq!(Value::Number(3.0).to_string(), "3");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::Str("nil".to_string()).to_string(), "\"nil\"");
        assert_eq!(Value::Bool(true).to_string(), "true");
    }
}
