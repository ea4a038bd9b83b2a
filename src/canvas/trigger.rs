//! Animation trigger tokens
//!
//! The engine never interprets these: they are attached to every scheduled
//! appearance, disappearance or motion and passed through to whatever builds
//! the presentation timeline. The textual form is a comma-separated list of
//! cues, e.g. `"after previous, delay:0.5, decelerate"`.

use crate::trace::errors::TraceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One token of the trigger vocabulary
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cue {
    AfterPrevious,
    WithPrevious,
    OnClick,
    /// Seconds to wait before starting
    Delay(f64),
    /// Motion speed in points per second
    Speed(f64),
    /// Seconds the effect takes
    Duration(f64),
    Accelerate,
    Decelerate,
}

/// How a step is started, as far as a timeline consumer cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Start {
    AfterPrevious,
    WithPrevious,
    OnClick,
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cue::AfterPrevious => write!(f, "after previous"),
            Cue::WithPrevious => write!(f, "with previous"),
            Cue::OnClick => write!(f, "on click"),
            Cue::Delay(s) => write!(f, "delay:{}", s),
            Cue::Speed(v) => write!(f, "speed:{}", v),
            Cue::Duration(s) => write!(f, "duration:{}", s),
            Cue::Accelerate => write!(f, "accelerate"),
            Cue::Decelerate => write!(f, "decelerate"),
        }
    }
}

impl FromStr for Cue {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let invalid = || TraceError::InvalidTrigger {
            token: token.to_string(),
        };
        match token {
            "after previous" => return Ok(Cue::AfterPrevious),
            "with previous" => return Ok(Cue::WithPrevious),
            "on click" => return Ok(Cue::OnClick),
            "accelerate" => return Ok(Cue::Accelerate),
            "decelerate" => return Ok(Cue::Decelerate),
            _ => {}
        }

        let (key, arg) = token.split_once(':').ok_or_else(invalid)?;
        let arg: f64 = arg.trim().parse().map_err(|_| invalid())?;
        if !arg.is_finite() || arg < 0.0 {
            return Err(invalid());
        }
        match key.trim() {
            "delay" => Ok(Cue::Delay(arg)),
            "speed" => Ok(Cue::Speed(arg)),
            "duration" => Ok(Cue::Duration(arg)),
            _ => Err(invalid()),
        }
    }
}

/// An ordered list of cues attached to one animation step
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Trigger {
    cues: Vec<Cue>,
}

impl Trigger {
    pub fn after_previous() -> Self {
        Trigger {
            cues: vec![Cue::AfterPrevious],
        }
    }

    pub fn with_previous() -> Self {
        Trigger {
            cues: vec![Cue::WithPrevious],
        }
    }

    pub fn on_click() -> Self {
        Trigger {
            cues: vec![Cue::OnClick],
        }
    }

    pub fn delay(mut self, seconds: f64) -> Self {
        self.cues.push(Cue::Delay(seconds));
        self
    }

    pub fn speed(mut self, points_per_second: f64) -> Self {
        self.cues.push(Cue::Speed(points_per_second));
        self
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.cues.push(Cue::Duration(seconds));
        self
    }

    pub fn accelerate(mut self) -> Self {
        self.cues.push(Cue::Accelerate);
        self
    }

    pub fn decelerate(mut self) -> Self {
        self.cues.push(Cue::Decelerate);
        self
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// The first start cue; a trigger without one starts on click
    pub fn start(&self) -> Start {
        self.cues
            .iter()
            .find_map(|cue| match cue {
                Cue::AfterPrevious => Some(Start::AfterPrevious),
                Cue::WithPrevious => Some(Start::WithPrevious),
                Cue::OnClick => Some(Start::OnClick),
                _ => None,
            })
            .unwrap_or(Start::OnClick)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cue) in self.cues.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", cue)?;
        }
        Ok(())
    }
}

impl FromStr for Trigger {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cues = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Cue>, _>>()?;
        Ok(Trigger { cues })
    }
}

impl From<Trigger> for String {
    fn from(trigger: Trigger) -> Self {
        trigger.to_string()
    }
}

impl TryFrom<String> for Trigger {
    type Error = TraceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_combined_tokens() {
        let trigger: Trigger = "after previous, delay:0.5, decelerate".parse().unwrap();
        assert_eq!(
            trigger.cues(),
            &[Cue::AfterPrevious, Cue::Delay(0.5), Cue::Decelerate]
        );
        assert_eq!(trigger.start(), Start::AfterPrevious);
    }

    #[test]
    fn test_display_matches_vocabulary() {
        let trigger = Trigger::with_previous().speed(200.0).accelerate();
        assert_eq!(trigger.to_string(), "with previous, speed:200, accelerate");
    }

    #[test]
    fn test_reject_unknown_token() {
        assert!("after lunch".parse::<Trigger>().is_err());
        assert!("delay:-1".parse::<Trigger>().is_err());
        assert!("wobble:3".parse::<Trigger>().is_err());
    }

    #[test]
    fn test_default_start_is_click() {
        let trigger: Trigger = "duration:2".parse().unwrap();
        assert_eq!(trigger.start(), Start::OnClick);
    }
}
