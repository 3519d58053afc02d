//! Background scroll lock held by the navigation menu

/// Document `overflow` policy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Unset,
    Visible,
    Auto,
    Hidden,
    Scroll,
    /// Any other value (`clip`, `overlay`, two-value forms), kept verbatim.
    Other(String),
}

impl Overflow {
    /// CSS value; `Unset` maps to the empty string, which removes the
    /// inline property.
    pub fn as_css(&self) -> &str {
        match self {
            Overflow::Unset => "",
            Overflow::Visible => "visible",
            Overflow::Auto => "auto",
            Overflow::Hidden => "hidden",
            Overflow::Scroll => "scroll",
            Overflow::Other(value) => value.as_str(),
        }
    }

    pub fn from_css(value: &str) -> Self {
        match value.trim() {
            "visible" => Overflow::Visible,
            "auto" => Overflow::Auto,
            "hidden" => Overflow::Hidden,
            "scroll" => Overflow::Scroll,
            "" => Overflow::Unset,
            other => Overflow::Other(other.to_string()),
        }
    }
}

/// A boolean lock, not a counter: acquiring twice and releasing once leaves
/// it released. The policy in force before the first acquire is restored on
/// release.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollLock {
    policy: Overflow,
    saved: Option<Overflow>,
}

impl ScrollLock {
    pub fn new(initial: Overflow) -> Self {
        Self {
            policy: initial,
            saved: None,
        }
    }

    pub fn is_held(&self) -> bool {
        self.saved.is_some()
    }

    pub fn policy(&self) -> Overflow {
        self.policy.clone()
    }

    /// Returns `true` when this call actually took the lock.
    pub fn acquire(&mut self) -> bool {
        if self.saved.is_some() {
            return false;
        }
        self.saved = Some(std::mem::replace(&mut self.policy, Overflow::Hidden));
        true
    }

    /// Returns `true` when this call actually released the lock.
    pub fn release(&mut self) -> bool {
        match self.saved.take() {
            Some(previous) => {
                self.policy = previous;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restores_prior_policy_not_unset() {
        let mut lock = ScrollLock::new(Overflow::Scroll);
        assert!(lock.acquire());
        assert_eq!(lock.policy(), Overflow::Hidden);
        assert!(lock.release());
        assert_eq!(lock.policy(), Overflow::Scroll);
    }

    #[test]
    fn test_reentrant_acquire_and_release() {
        let mut lock = ScrollLock::new(Overflow::Auto);
        assert!(lock.acquire());
        assert!(!lock.acquire());
        assert!(lock.release());
        assert!(!lock.release());
        assert!(!lock.is_held());
        assert_eq!(lock.policy(), Overflow::Auto);
    }

    #[test]
    fn test_css_mapping() {
        assert_eq!(Overflow::from_css("hidden"), Overflow::Hidden);
        assert_eq!(Overflow::from_css(""), Overflow::Unset);
        assert_eq!(Overflow::from_css("clip"), Overflow::Other("clip".to_string()));
        assert_eq!(Overflow::Unset.as_css(), "");
    }

    #[test]
    fn test_restores_unlisted_policy_verbatim() {
        let mut lock = ScrollLock::new(Overflow::from_css(" hidden scroll "));
        assert!(lock.acquire());
        assert_eq!(lock.policy(), Overflow::Hidden);
        assert!(lock.release());
        assert_eq!(lock.policy().as_css(), "hidden scroll");

        let mut lock = ScrollLock::new(Overflow::from_css("clip"));
        lock.acquire();
        lock.release();
        assert_eq!(lock.policy().as_css(), "clip");
    }
}
