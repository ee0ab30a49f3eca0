use crate::variable::{Variable, VariableKey};

/// A rule premise or consequent.
///
/// Built from variable handles: `speed.is(Speed::Fast).and(distance.is(Distance::Close))`.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr<T> {
    Is(VariableKey, T),
    And(Vec<Expr<T>>),
    Or(Vec<Expr<T>>),
}

impl<T> Expr<T> {
    pub fn and(self, rhs: Expr<T>) -> Self {
        match self {
            Expr::And(mut exprs) => {
                exprs.push(rhs);
                Expr::And(exprs)
            },
            lhs => Expr::And(vec![lhs, rhs]),
        }
    }

    pub fn or(self, rhs: Expr<T>) -> Self {
        match self {
            Expr::Or(mut exprs) => {
                exprs.push(rhs);
                Expr::Or(exprs)
            },
            lhs => Expr::Or(vec![lhs, rhs]),
        }
    }

    pub fn propositions(&self) -> Vec<(VariableKey, &T)> {
        let mut props = Vec::new();

        fn parse<'p, T>(expr: &'p Expr<T>, out: &mut Vec<(VariableKey, &'p T)>) {
            match expr {
                Expr::Is(var_key, term) => out.push((*var_key, term)),
                Expr::And(exprs) | Expr::Or(exprs) => {
                    for expr in exprs {
                        parse(expr, out);
                    }
                },
            }
        }

        parse(self, &mut props);

        props
    }
}

impl<I> Variable<I> {
    pub fn is<T>(self, rhs: I) -> Expr<T>
    where
        I: Into<T>,
    {
        Expr::Is(self.0, rhs.into())
    }
}
