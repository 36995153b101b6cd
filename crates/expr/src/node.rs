use std::{
    f64::consts,
    fmt,
    ops::{Add, Div, Mul, Neg, Sub},
};

/// A named mathematical constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    /// Looks up a constant by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Self::Pi),
            "e" => Some(Self::E),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Pi => consts::PI,
            Self::E => consts::E,
        }
    }
}

/// A supported single-argument function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Sqrt,
    Abs,
}

impl Func {
    /// Looks up a function by name. `log` is the natural logarithm.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let func = match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "exp" => Self::Exp,
            "ln" | "log" => Self::Ln,
            "sqrt" => Self::Sqrt,
            "abs" => Self::Abs,
            _ => return None,
        };
        Some(func)
    }

    /// The canonical name, as understood by the numeric backend.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
        }
    }
}

/// A formula as an expression tree.
///
/// The variants build raw trees, which is what the parser produces. The
/// operator impls (`+`, `-`, `*`, `/`, unary `-`) and [`Node::pow`] build
/// simplified trees instead: they fold numeric constants and drop identity
/// operations, which keeps derived formulas readable.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Num(f64),
    Const(Constant),
    Var(String),
    Neg(Box<Node>),
    Add(Box<Node>, Box<Node>),
    Sub(Box<Node>, Box<Node>),
    Mul(Box<Node>, Box<Node>),
    Div(Box<Node>, Box<Node>),
    Pow(Box<Node>, Box<Node>),
    Call(Func, Box<Node>),
}

impl Node {
    #[must_use]
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    #[must_use]
    pub fn num(value: f64) -> Self {
        Self::Num(value)
    }

    /// Applies `func` to `arg`.
    #[must_use]
    pub fn call(func: Func, arg: Node) -> Self {
        Self::Call(func, Box::new(arg))
    }

    /// Returns the numeric value if this node is a literal number.
    #[must_use]
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Self::Num(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns true if the tree mentions the variable `var`.
    #[must_use]
    pub fn contains_var(&self, var: &str) -> bool {
        match self {
            Self::Num(_) | Self::Const(_) => false,
            Self::Var(name) => name == var,
            Self::Neg(arg) | Self::Call(_, arg) => arg.contains_var(var),
            Self::Add(lhs, rhs)
            | Self::Sub(lhs, rhs)
            | Self::Mul(lhs, rhs)
            | Self::Div(lhs, rhs)
            | Self::Pow(lhs, rhs) => lhs.contains_var(var) || rhs.contains_var(var),
        }
    }

    /// Rebuilds the tree through the simplifying constructors.
    ///
    /// Parsed trees are raw, so `x^(1/3)` keeps its exponent as a division
    /// until simplified.
    #[must_use]
    pub fn simplified(&self) -> Node {
        match self {
            Self::Num(_) | Self::Const(_) | Self::Var(_) => self.clone(),
            Self::Neg(arg) => -arg.simplified(),
            Self::Add(lhs, rhs) => lhs.simplified() + rhs.simplified(),
            Self::Sub(lhs, rhs) => lhs.simplified() - rhs.simplified(),
            Self::Mul(lhs, rhs) => lhs.simplified() * rhs.simplified(),
            Self::Div(lhs, rhs) => lhs.simplified() / rhs.simplified(),
            Self::Pow(base, exponent) => base.simplified().pow(exponent.simplified()),
            Self::Call(func, arg) => Self::call(*func, arg.simplified()),
        }
    }

    /// Raises `self` to `exponent`, simplifying.
    #[must_use]
    pub fn pow(self, exponent: Node) -> Self {
        if let (Some(base), Some(exp)) = (self.as_num(), exponent.as_num())
            && let Some(node) = finite(base.powf(exp))
        {
            return node;
        }
        if exponent.is_num(0.0) || self.is_num(1.0) {
            return Self::Num(1.0);
        }
        if exponent.is_num(1.0) {
            return self;
        }
        Self::Pow(Box::new(self), Box::new(exponent))
    }

    #[allow(clippy::float_cmp)]
    fn is_num(&self, value: f64) -> bool {
        self.as_num().is_some_and(|v| v == value)
    }

    /// Binding strength used when rendering; higher binds tighter.
    ///
    /// Negations and negative literals report the lowest strength so they are
    /// parenthesized as operands everywhere but the left of a sum.
    fn precedence(&self) -> u8 {
        match self {
            Self::Neg(_) => 0,
            Self::Num(value) if value.is_sign_negative() => 0,
            Self::Add(..) | Self::Sub(..) => 1,
            Self::Mul(..) | Self::Div(..) => 2,
            Self::Pow(..) => 3,
            Self::Num(_) | Self::Const(_) | Self::Var(_) | Self::Call(..) => 4,
        }
    }
}

/// Wraps a folded constant, refusing non-finite results.
fn finite(value: f64) -> Option<Node> {
    value.is_finite().then_some(Node::Num(value))
}

impl Neg for Node {
    type Output = Node;

    fn neg(self) -> Node {
        match self {
            // `0.0 - value` keeps a negated zero positive.
            Node::Num(value) => Node::Num(0.0 - value),
            Node::Neg(arg) => *arg,
            other => Node::Neg(Box::new(other)),
        }
    }
}

impl Add for Node {
    type Output = Node;

    fn add(self, rhs: Node) -> Node {
        if let (Some(a), Some(b)) = (self.as_num(), rhs.as_num())
            && let Some(node) = finite(a + b)
        {
            return node;
        }
        if self.is_num(0.0) {
            return rhs;
        }
        if rhs.is_num(0.0) {
            return self;
        }
        match rhs {
            Node::Neg(arg) => self - *arg,
            Node::Num(value) if value < 0.0 => self - Node::Num(-value),
            rhs => Node::Add(Box::new(self), Box::new(rhs)),
        }
    }
}

impl Sub for Node {
    type Output = Node;

    fn sub(self, rhs: Node) -> Node {
        if let (Some(a), Some(b)) = (self.as_num(), rhs.as_num())
            && let Some(node) = finite(a - b)
        {
            return node;
        }
        if rhs.is_num(0.0) {
            return self;
        }
        if self.is_num(0.0) {
            return -rhs;
        }
        if self == rhs {
            return Node::Num(0.0);
        }
        match rhs {
            Node::Neg(arg) => self + *arg,
            Node::Num(value) if value < 0.0 => self + Node::Num(-value),
            rhs => Node::Sub(Box::new(self), Box::new(rhs)),
        }
    }
}

impl Mul for Node {
    type Output = Node;

    fn mul(self, rhs: Node) -> Node {
        if let (Some(a), Some(b)) = (self.as_num(), rhs.as_num())
            && let Some(node) = finite(a * b)
        {
            return node;
        }
        if self.is_num(0.0) || rhs.is_num(0.0) {
            return Node::Num(0.0);
        }
        if self.is_num(1.0) {
            return rhs;
        }
        if rhs.is_num(1.0) {
            return self;
        }
        if self.is_num(-1.0) {
            return -rhs;
        }
        if rhs.is_num(-1.0) {
            return -self;
        }
        match (self, rhs) {
            (Node::Neg(lhs), rhs) => -(*lhs * rhs),
            (lhs, Node::Neg(rhs)) => -(lhs * *rhs),
            (Node::Num(a), rhs) if a < 0.0 && rhs.as_num().is_none() => -(Node::Num(-a) * rhs),
            // Constants go first: `u*3` reads as `3*u`.
            (lhs, Node::Num(b)) if lhs.as_num().is_none() => Node::Num(b) * lhs,
            (Node::Num(a), Node::Mul(inner_lhs, inner_rhs)) => match inner_lhs.as_num() {
                Some(b) if (a * b).is_finite() => Node::Num(a * b) * *inner_rhs,
                _ => Node::Mul(
                    Box::new(Node::Num(a)),
                    Box::new(Node::Mul(inner_lhs, inner_rhs)),
                ),
            },
            (lhs, rhs) => Node::Mul(Box::new(lhs), Box::new(rhs)),
        }
    }
}

impl Div for Node {
    type Output = Node;

    fn div(self, rhs: Node) -> Node {
        if let (Some(a), Some(b)) = (self.as_num(), rhs.as_num())
            && let Some(node) = finite(a / b)
        {
            return node;
        }
        if self.is_num(0.0) && !rhs.is_num(0.0) {
            return Node::Num(0.0);
        }
        if rhs.is_num(1.0) {
            return self;
        }
        if rhs.is_num(-1.0) {
            return -self;
        }
        if self == rhs {
            return Node::Num(1.0);
        }
        match (self, rhs) {
            (Node::Num(a), rhs) if a < 0.0 && rhs.as_num().is_none() => -(Node::Num(-a) / rhs),
            (Node::Neg(lhs), rhs) => -(*lhs / rhs),
            (lhs, Node::Neg(rhs)) => -(lhs / *rhs),
            (lhs, rhs) => Node::Div(Box::new(lhs), Box::new(rhs)),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Num(value) => write!(f, "{value}"),
            Node::Const(constant) => f.write_str(constant.name()),
            Node::Var(name) => f.write_str(name),
            Node::Neg(arg) => {
                f.write_str("-")?;
                operand(f, arg, 4)
            }
            // A leading negation needs no parentheses: `-sin(x) - 1`.
            Node::Add(lhs, rhs) => binary(f, lhs, " + ", rhs, 0, 2),
            Node::Sub(lhs, rhs) => binary(f, lhs, " - ", rhs, 0, 2),
            Node::Mul(lhs, rhs) => binary(f, lhs, "*", rhs, 2, 3),
            Node::Div(lhs, rhs) => binary(f, lhs, "/", rhs, 2, 3),
            // Right-associative: `a^b^c` is `a^(b^c)`.
            Node::Pow(lhs, rhs) => binary(f, lhs, "^", rhs, 4, 3),
            Node::Call(func, arg) => write!(f, "{}({arg})", func.name()),
        }
    }
}

fn binary(
    f: &mut fmt::Formatter<'_>,
    lhs: &Node,
    op: &str,
    rhs: &Node,
    lhs_min: u8,
    rhs_min: u8,
) -> fmt::Result {
    operand(f, lhs, lhs_min)?;
    f.write_str(op)?;
    operand(f, rhs, rhs_min)
}

/// Writes `node`, parenthesized if it binds looser than `min`.
fn operand(f: &mut fmt::Formatter<'_>, node: &Node, min: u8) -> fmt::Result {
    if node.precedence() < min {
        write!(f, "({node})")
    } else {
        write!(f, "{node}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Node {
        Node::var("x")
    }

    #[test]
    fn folds_constants() {
        assert_eq!(Node::num(2.0) + Node::num(3.0), Node::num(5.0));
        assert_eq!(Node::num(2.0) * Node::num(3.0), Node::num(6.0));
        assert_eq!(Node::num(3.0).pow(Node::num(2.0)), Node::num(9.0));
        assert_eq!(-Node::num(2.0), Node::num(-2.0));
    }

    #[test]
    fn never_folds_to_non_finite() {
        let node = Node::num(1.0) / Node::num(0.0);
        assert!(matches!(node, Node::Div(..)));
    }

    #[test]
    fn drops_identities() {
        assert_eq!(Node::num(0.0) + x(), x());
        assert_eq!(x() - Node::num(0.0), x());
        assert_eq!(Node::num(1.0) * x(), x());
        assert_eq!(x() * Node::num(0.0), Node::num(0.0));
        assert_eq!(x() / Node::num(1.0), x());
        assert_eq!(x().pow(Node::num(1.0)), x());
        assert_eq!(x().pow(Node::num(0.0)), Node::num(1.0));
        assert_eq!(-(-x()), x());
        assert_eq!(x() - x(), Node::num(0.0));
        assert_eq!(x() / x(), Node::num(1.0));
    }

    #[test]
    fn moves_constants_to_the_front() {
        let node = x() * Node::num(3.0);
        assert_eq!(node.to_string(), "3*x");

        let node = Node::num(2.0) * (Node::num(3.0) * x());
        assert_eq!(node.to_string(), "6*x");
    }

    #[test]
    fn renders_negative_terms_as_subtraction() {
        assert_eq!((x() + Node::num(-2.0)).to_string(), "x - 2");
        assert_eq!((x() + -x().pow(Node::num(2.0))).to_string(), "x - x^2");
        assert_eq!((Node::num(-1.0) * x()).to_string(), "-x");
    }

    #[test]
    fn parenthesizes_by_precedence() {
        let sum = Node::Add(Box::new(x()), Box::new(Node::num(1.0)));
        let node = Node::Mul(Box::new(Node::num(2.0)), Box::new(sum.clone()));
        assert_eq!(node.to_string(), "2*(x + 1)");

        let node = Node::Sub(Box::new(x()), Box::new(sum));
        assert_eq!(node.to_string(), "x - (x + 1)");

        let node = Node::Pow(
            Box::new(Node::Neg(Box::new(x()))),
            Box::new(Node::Neg(Box::new(Node::num(2.0)))),
        );
        assert_eq!(node.to_string(), "(-x)^(-2)");

        let node = Node::Neg(Box::new(Node::Pow(Box::new(x()), Box::new(Node::num(2.0)))));
        assert_eq!(node.to_string(), "-(x^2)");
    }

    #[test]
    fn leading_negation_is_bare() {
        let sin = Node::call(Func::Sin, x());
        let node = Node::Sub(Box::new(Node::Neg(Box::new(sin))), Box::new(Node::num(1.0)));
        assert_eq!(node.to_string(), "-sin(x) - 1");

        let node = Node::Add(Box::new(Node::num(-2.0)), Box::new(x()));
        assert_eq!(node.to_string(), "-2 + x");

        let node = x() - (-x() - Node::num(1.0));
        assert_eq!(node.to_string(), "x - (-x - 1)");
    }

    #[test]
    fn simplifies_raw_trees() {
        let quarter = Node::Div(Box::new(Node::num(1.0)), Box::new(Node::num(4.0)));
        let node = Node::Pow(Box::new(x()), Box::new(quarter));
        assert_eq!(node.simplified(), Node::Pow(Box::new(x()), Box::new(Node::num(0.25))));

        let double_neg = Node::Neg(Box::new(Node::Neg(Box::new(x()))));
        let node = Node::Mul(Box::new(Node::num(1.0)), Box::new(double_neg));
        assert_eq!(node.simplified(), x());
    }

    #[test]
    fn power_is_right_associative() {
        let inner = Node::Pow(Box::new(x()), Box::new(Node::num(3.0)));
        let node = Node::Pow(Box::new(Node::num(2.0)), Box::new(inner.clone()));
        assert_eq!(node.to_string(), "2^x^3");

        let node = Node::Pow(Box::new(inner), Box::new(Node::num(2.0)));
        assert_eq!(node.to_string(), "(x^3)^2");
    }

    #[test]
    fn renders_calls_and_constants() {
        let node = Node::call(Func::Sin, Node::Const(Constant::Pi) * x());
        assert_eq!(node.to_string(), "sin(pi*x)");
        assert_eq!(Func::from_name("log"), Some(Func::Ln));
        assert_eq!(Func::Ln.name(), "ln");
    }

    #[test]
    fn tracks_variable_usage() {
        assert!(Node::call(Func::Exp, x()).contains_var("x"));
        assert!(!Node::Const(Constant::E).contains_var("x"));
        assert!(!x().contains_var("y"));
    }
}
