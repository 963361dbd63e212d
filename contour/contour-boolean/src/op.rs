//! The boolean operator selector.

/// Which boolean set operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    /// Combined area of all operands.
    Union,
    /// Area common to every operand.
    Intersection,
    /// First operand minus the union of the rest.
    Difference,
}

impl std::fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Union => write!(f, "union"),
            Self::Intersection => write!(f, "intersection"),
            Self::Difference => write!(f, "difference"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(BooleanOp::Union.to_string(), "union");
        assert_eq!(BooleanOp::Intersection.to_string(), "intersection");
        assert_eq!(BooleanOp::Difference.to_string(), "difference");
    }
}
