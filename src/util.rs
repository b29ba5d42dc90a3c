use crate::codec::NotationContext;
use crate::error::NotationError;
use crate::types::note::Duration;
use crate::types::pitch::Pitch;
use crate::Result;

/// Parse a positive duration written as `1/8`, `3/2` or `2`.
pub fn parse_duration(value: &str) -> Result<Duration> {
    let value = value.trim();
    let duration: Duration = value
        .parse()
        .map_err(|_| NotationError::InvalidDuration {
            token: value.to_string(),
            reason: "expected a fraction such as 1/8",
        })?;
    if duration <= Duration::from_integer(0) {
        return Err(NotationError::NonPositiveDuration(value.to_string()));
    }
    Ok(duration)
}

pub fn assert_decodes(context: &NotationContext, token: &str, pitch: &str, duration: Duration) {
    let decoded = context
        .decode(token)
        .unwrap_or_else(|e| panic!("Failed to decode \"{}\": {}", token, e));
    let expected = Pitch::from_name(pitch).expect("Failed to parse expected pitch");
    assert_eq!(
        decoded.pitch(),
        expected,
        "pitch of \"{}\": {} != {}",
        token,
        decoded.pitch(),
        expected
    );
    assert_eq!(decoded.duration(), duration, "duration of \"{}\"", token);
}
