use super::HBox;

/// Alternative typesetting at a potential break: `pre_break` is shown if the
/// line is cut here, `post_break` at the start of the following line, and
/// `no_break` if the break isn't taken. A plain discretionary hyphen is
/// `("-", "", "")`; ligatures around a hyphenation point produce richer ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Discretionary {
    pre_break: HBox,
    post_break: HBox,
    no_break: HBox,
    penalty: i64,
}

impl Discretionary {
    /// Default cost of breaking at a discretionary hyphen.
    pub const HYPHEN_PENALTY: i64 = 50;

    pub fn new(pre_break: HBox, post_break: HBox, no_break: HBox, penalty: i64) -> Discretionary {
        Discretionary {
            pre_break,
            post_break,
            no_break,
            penalty,
        }
    }

    pub fn pre_break(&self) -> &HBox {
        &self.pre_break
    }

    pub fn post_break(&self) -> &HBox {
        &self.post_break
    }

    pub fn no_break(&self) -> &HBox {
        &self.no_break
    }

    pub fn penalty(&self) -> i64 {
        self.penalty
    }
}
