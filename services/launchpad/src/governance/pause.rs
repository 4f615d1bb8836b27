//! Binary pause switch

use crate::error::{LaunchpadError, LaunchpadResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PauseGate {
    paused: bool,
}

impl PauseGate {
    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn when_not_paused(&self) -> LaunchpadResult<()> {
        if self.paused {
            return Err(LaunchpadError::EnforcedPause);
        }
        Ok(())
    }

    pub fn when_paused(&self) -> LaunchpadResult<()> {
        if !self.paused {
            return Err(LaunchpadError::ExpectedPause);
        }
        Ok(())
    }

    pub fn pause(&mut self) -> LaunchpadResult<()> {
        self.when_not_paused()?;
        self.paused = true;
        Ok(())
    }

    pub fn unpause(&mut self) -> LaunchpadResult<()> {
        self.when_paused()?;
        self.paused = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let mut gate = PauseGate::default();
        assert_eq!(gate.unpause(), Err(LaunchpadError::ExpectedPause));
        gate.pause().unwrap();
        assert!(gate.paused());
        assert_eq!(gate.pause(), Err(LaunchpadError::EnforcedPause));
        assert_eq!(gate.when_not_paused(), Err(LaunchpadError::EnforcedPause));
        gate.unpause().unwrap();
        assert!(gate.when_not_paused().is_ok());
    }
}
