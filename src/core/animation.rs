use crate::MarkerError;

/// CSS class applied to advanced marker content for the drop entrance
/// animation; removed again by the animation-end handler.
pub const DROP_CLASS: &str = "drop";

/// CSS class applied to advanced marker content for the persistent bounce
/// animation.
pub const BOUNCE_CLASS: &str = "bounce";

/// Animation mode requested on a marker binding.
///
/// The discriminants match the integer prop encoding hosts pass in
/// (`1 = Bounce`, `2 = Drop`); "no animation" is the absent `Option`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AnimationMode {
    Bounce = 1,
    Drop = 2,
}

impl TryFrom<u8> for AnimationMode {
    type Error = MarkerError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(AnimationMode::Bounce),
            2 => Ok(AnimationMode::Drop),
            other => Err(MarkerError::InvalidAnimation(other)),
        }
    }
}

impl std::fmt::Display for AnimationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnimationMode::Bounce => write!(f, "bounce"),
            AnimationMode::Drop => write!(f, "drop"),
        }
    }
}

/// The classic SDK's native animation constant, as accepted by the classic
/// marker's animation setter. Cleared with `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdkAnimation {
    Bounce,
    Drop,
}

impl From<AnimationMode> for SdkAnimation {
    fn from(mode: AnimationMode) -> Self {
        match mode {
            AnimationMode::Bounce => SdkAnimation::Bounce,
            AnimationMode::Drop => SdkAnimation::Drop,
        }
    }
}
