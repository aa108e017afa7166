use strum::{AsRefStr, EnumString};

/// Subscription level. Only privileged users may reserve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Tier {
    #[default]
    Standard,
    Privileged,
}

impl Tier {
    pub fn can_reserve(&self) -> bool {
        matches!(self, Tier::Privileged)
    }
}
