use core::fmt;

use kutulu_core::Point;

/// The single command the bot emits each turn.
///
/// `Display` yields the exact protocol line, without the trailing newline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Walk toward `to`; the server moves one step along its own path.
    Move {
        to: Point,
        message: Option<&'static str>,
    },
    /// Stay put.
    Wait { message: Option<&'static str> },
    /// Activate the heal effect (protocol keyword `PLAN`).
    Plan,
    /// Activate the light effect.
    Light,
}

impl Action {
    pub fn move_to(to: Point) -> Self {
        Action::Move { to, message: None }
    }

    pub fn wait() -> Self {
        Action::Wait { message: None }
    }

    /// Attaches a flavour message; ignored by `PLAN` and `LIGHT`.
    pub fn with_message(self, text: &'static str) -> Self {
        match self {
            Action::Move { to, .. } => Action::Move {
                to,
                message: Some(text),
            },
            Action::Wait { .. } => Action::Wait {
                message: Some(text),
            },
            other => other,
        }
    }

    pub fn destination(&self) -> Option<Point> {
        match self {
            Action::Move { to, .. } => Some(*to),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move { to, message } => {
                write!(f, "MOVE {to}")?;
                if let Some(text) = message {
                    write!(f, " {text}")?;
                }
                Ok(())
            }
            Action::Wait { message } => {
                f.write_str("WAIT")?;
                if let Some(text) = message {
                    write!(f, " {text}")?;
                }
                Ok(())
            }
            Action::Plan => f.write_str("PLAN"),
            Action::Light => f.write_str("LIGHT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_protocol_lines() {
        assert_eq!(Action::move_to(Point::new(4, 7)).to_string(), "MOVE 4 7");
        assert_eq!(
            Action::move_to(Point::new(4, 7))
                .with_message("Fear!!")
                .to_string(),
            "MOVE 4 7 Fear!!"
        );
        assert_eq!(Action::wait().to_string(), "WAIT");
        assert_eq!(Action::wait().with_message("ok").to_string(), "WAIT ok");
        assert_eq!(Action::Plan.with_message("ignored").to_string(), "PLAN");
        assert_eq!(Action::Light.to_string(), "LIGHT");
    }
}
