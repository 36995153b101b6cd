use crate::node::{Func, Node};

/// Returns the symbolic derivative of `node` with respect to `var`.
///
/// The result is built with the simplifying constructors, so constant
/// factors are folded and identity terms dropped: the derivative of
/// `x^3 - x - 2` renders as `3*x^2 - 1`. The input is simplified first, so
/// constant subexpressions such as the `1/3` in `x^(1/3)` are folded too.
#[must_use]
pub fn derivative(node: &Node, var: &str) -> Node {
    differentiate(&node.simplified(), var)
}

fn differentiate(node: &Node, var: &str) -> Node {
    match node {
        Node::Num(_) | Node::Const(_) => Node::num(0.0),
        Node::Var(name) => Node::num(if name == var { 1.0 } else { 0.0 }),
        Node::Neg(arg) => -differentiate(arg, var),
        Node::Add(lhs, rhs) => differentiate(lhs, var) + differentiate(rhs, var),
        Node::Sub(lhs, rhs) => differentiate(lhs, var) - differentiate(rhs, var),
        Node::Mul(lhs, rhs) => {
            let (u, v) = (lhs.as_ref(), rhs.as_ref());
            differentiate(u, var) * v.clone() + u.clone() * differentiate(v, var)
        }
        Node::Div(lhs, rhs) => {
            let (u, v) = (lhs.as_ref(), rhs.as_ref());
            if !v.contains_var(var) {
                return differentiate(u, var) / v.clone();
            }
            (differentiate(u, var) * v.clone() - u.clone() * differentiate(v, var))
                / v.clone().pow(Node::num(2.0))
        }
        Node::Pow(base, exponent) => power(base, exponent, var),
        Node::Call(func, arg) => {
            let du = differentiate(arg, var);
            chain(*func, arg, du)
        }
    }
}

fn power(base: &Node, exponent: &Node, var: &str) -> Node {
    match (base.contains_var(var), exponent.contains_var(var)) {
        (false, false) => Node::num(0.0),
        // d(u^n) = n*u^(n-1)*u'
        (true, false) => {
            let n = exponent.clone();
            let lowered = n.clone() - Node::num(1.0);
            n * base.clone().pow(lowered) * differentiate(base, var)
        }
        // d(a^v) = a^v*ln(a)*v'
        (false, true) => {
            let power = base.clone().pow(exponent.clone());
            power * Node::call(Func::Ln, base.clone()) * differentiate(exponent, var)
        }
        // d(u^v) = u^v*(v'*ln(u) + v*u'/u)
        (true, true) => {
            let power = base.clone().pow(exponent.clone());
            let log_term = differentiate(exponent, var) * Node::call(Func::Ln, base.clone());
            let base_term = exponent.clone() * differentiate(base, var) / base.clone();
            power * (log_term + base_term)
        }
    }
}

/// Applies the chain rule: `d f(u) = f'(u) * u'`.
fn chain(func: Func, arg: &Node, du: Node) -> Node {
    let u = || arg.clone();
    let one = || Node::num(1.0);
    let two = || Node::num(2.0);

    match func {
        Func::Sin => Node::call(Func::Cos, u()) * du,
        Func::Cos => -(Node::call(Func::Sin, u()) * du),
        Func::Tan => du / Node::call(Func::Cos, u()).pow(two()),
        Func::Asin => du / Node::call(Func::Sqrt, one() - u().pow(two())),
        Func::Acos => -(du / Node::call(Func::Sqrt, one() - u().pow(two()))),
        Func::Atan => du / (one() + u().pow(two())),
        Func::Sinh => Node::call(Func::Cosh, u()) * du,
        Func::Cosh => Node::call(Func::Sinh, u()) * du,
        Func::Tanh => du / Node::call(Func::Cosh, u()).pow(two()),
        Func::Exp => Node::call(Func::Exp, u()) * du,
        Func::Ln => du / u(),
        Func::Sqrt => du / (two() * Node::call(Func::Sqrt, u())),
        // Undefined at u = 0, where u/abs(u) is NaN.
        Func::Abs => u() / Node::call(Func::Abs, u()) * du,
    }
}
