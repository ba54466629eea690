//! Sound effect dispatch
//!
//! The simulation never plays sounds itself. It records `GameEvent`s, and
//! the presentation layer hands them to an `AudioManager` after each tick.
//! Playback goes through an `AudioBackend`; a failing backend is logged and
//! otherwise ignored so the game keeps running.

use thiserror::Error;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Run started from the title screen
    Start,
    /// Player took damage
    Hit,
    /// A gun fired
    Shot,
    /// A monster was killed
    MonsterDeath,
    /// A weapon was picked up
    PickupCollect,
    /// Invincibility skill triggered
    Skill,
    /// Game over
    GameOver,
}

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::RunStarted => Some(SoundEffect::Start),
            GameEvent::Hit => Some(SoundEffect::Hit),
            GameEvent::Shot { .. } => Some(SoundEffect::Shot),
            GameEvent::MonsterSlain { .. } => Some(SoundEffect::MonsterDeath),
            GameEvent::WeaponPickedUp { .. } => Some(SoundEffect::PickupCollect),
            GameEvent::SkillActivated => Some(SoundEffect::Skill),
            GameEvent::GameOver => Some(SoundEffect::GameOver),
        }
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio device unavailable: {0}")]
    DeviceUnavailable(String),
    #[error("failed to play {effect:?}: {reason}")]
    Playback { effect: SoundEffect, reason: String },
}

/// Whatever actually makes the noise
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
        log::trace!("play {:?} at {:.2}", effect, volume);
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AudioManager {
    /// Create a manager; `None` means audio is disabled
    pub fn new(backend: Option<Box<dyn AudioBackend>>) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend - audio disabled");
        }
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(backend: Option<Box<dyn AudioBackend>>, settings: &Settings) -> Self {
        let mut manager = Self::new(backend);
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_muted(settings.muted);
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(backend) = self.backend.as_mut() else {
            return;
        };

        if let Err(e) = backend.play(effect, vol) {
            log::warn!("Audio error: {}", e);
        }
    }

    /// Play the sound for every event of a tick
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Played = Rc<RefCell<Vec<(SoundEffect, f32)>>>;

    struct Recording(Played);

    impl AudioBackend for Recording {
        fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
            self.0.borrow_mut().push((effect, volume));
            Ok(())
        }
    }

    struct Broken;

    impl AudioBackend for Broken {
        fn play(&mut self, effect: SoundEffect, _volume: f32) -> Result<(), AudioError> {
            Err(AudioError::Playback {
                effect,
                reason: "device lost".into(),
            })
        }
    }

    fn recording() -> (AudioManager, Played) {
        let played = Played::default();
        let manager = AudioManager::new(Some(Box::new(Recording(played.clone()))));
        (manager, played)
    }

    #[test]
    fn test_events_map_to_effects() {
        let (mut audio, played) = recording();
        audio.play_events(&[
            GameEvent::Shot { owner_id: 1 },
            GameEvent::MonsterSlain { monster_id: 4 },
            GameEvent::GameOver,
        ]);
        let effects: Vec<_> = played.borrow().iter().map(|(e, _)| *e).collect();
        assert_eq!(
            effects,
            vec![SoundEffect::Shot, SoundEffect::MonsterDeath, SoundEffect::GameOver]
        );
    }

    #[test]
    fn test_volume_and_mute() {
        let (mut audio, played) = recording();
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(2.0);
        assert_eq!(audio.effective_volume(), 0.5);

        audio.play(SoundEffect::Hit);
        assert_eq!(played.borrow()[0], (SoundEffect::Hit, 0.5));

        audio.set_muted(true);
        audio.play(SoundEffect::Hit);
        assert_eq!(played.borrow().len(), 1);
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            master_volume: 0.4,
            sfx_volume: 0.5,
            muted: false,
            ..Default::default()
        };
        let audio = AudioManager::from_settings(None, &settings);
        assert!((audio.effective_volume() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_backend_failure_is_not_fatal() {
        let mut audio = AudioManager::new(Some(Box::new(Broken)));
        audio.play(SoundEffect::Skill);
        audio.play_events(&[GameEvent::Hit, GameEvent::RunStarted]);

        let mut silent = AudioManager::default();
        silent.play(SoundEffect::Start);
    }
}
