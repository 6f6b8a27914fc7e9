//! Audio cue boundary
//!
//! The simulation only names sounds; it never plays them. Each tick leaves its
//! cues in [`crate::sim::GameState::events`] and the host hands them to an
//! [`AudioManager`], which applies volume/mute policy before forwarding to a
//! [`CuePlayer`] backend.

use serde::{Deserialize, Serialize};

use crate::Settings;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// Two bears bounced off each other
    TeddyBounce,
    /// Burger lost health
    BurgerDamage,
    /// Burger fired french fries
    BurgerShot,
    /// A bear fired a projectile
    TeddyShot,
    /// A bear blew up
    Explosion,
    /// Burger health ran out
    BurgerDeath,
}

impl Cue {
    /// Asset-style name of the cue
    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::TeddyBounce => "TeddyBounce",
            Cue::BurgerDamage => "BurgerDamage",
            Cue::BurgerShot => "BurgerShot",
            Cue::TeddyShot => "TeddyShot",
            Cue::Explosion => "Explosion",
            Cue::BurgerDeath => "BurgerDeath",
        }
    }
}

/// Backend that actually makes noise
pub trait CuePlayer {
    /// Fire-and-forget playback at the given volume (0.0 - 1.0)
    fn play(&mut self, cue: Cue, volume: f32);
}

/// Backend that writes cues to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogCuePlayer;

impl CuePlayer for LogCuePlayer {
    fn play(&mut self, cue: Cue, volume: f32) {
        log::debug!("♪ {} (volume {:.2})", cue.as_str(), volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<P: CuePlayer> {
    player: P,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    played: u64,
}

impl<P: CuePlayer> AudioManager<P> {
    /// Manager with the default settings' volumes
    pub fn new(player: P) -> Self {
        Self::from_settings(player, &Settings::default())
    }

    /// Manager configured from runner settings
    pub fn from_settings(player: P, settings: &Settings) -> Self {
        let mut manager = Self {
            player,
            master_volume: 0.0,
            sfx_volume: 0.0,
            muted: settings.muted,
            played: 0,
        };
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
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

    /// Play a cue
    pub fn play(&mut self, cue: Cue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.player.play(cue, vol);
        self.played += 1;
    }

    /// Play every cue raised by one tick
    pub fn play_all(&mut self, cues: &[Cue]) {
        for &cue in cues {
            self.play(cue);
        }
    }

    /// Cues forwarded to the backend so far
    pub fn cues_played(&self) -> u64 {
        self.played
    }

    pub fn player(&self) -> &P {
        &self.player
    }
}
