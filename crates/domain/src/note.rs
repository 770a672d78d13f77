use serde::{Deserialize, Serialize};

use crate::DomainError;

/// The twelve canonical pitch-class names, sharps only.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PitchClass {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    /// Semitone offset within the octave, C = 0.
    pub fn index(self) -> u8 {
        Self::ALL.iter().position(|&pc| pc == self).unwrap_or(0) as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Constant-friendly label, `Cs` renders as `CS` (Arduino pitches.h style).
    pub fn label(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Cs => "CS",
            PitchClass::D => "D",
            PitchClass::Ds => "DS",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Fs => "FS",
            PitchClass::G => "G",
            PitchClass::Gs => "GS",
            PitchClass::A => "A",
            PitchClass::As => "AS",
            PitchClass::B => "B",
        }
    }
}

/// MIDI-style semitone index. A4 (440 Hz reference) is 69.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NoteId(i32);

impl NoteId {
    /// Lowest identifier with a symbolic name (C-1).
    pub const MIN_RENDERABLE: i32 = 0;
    /// Highest identifier with a symbolic name (G9).
    pub const MAX_RENDERABLE: i32 = 127;

    pub fn new(semitone: i32) -> Self {
        Self(semitone)
    }

    pub fn semitone(self) -> i32 {
        self.0
    }

    /// Symbolic form, `None` outside the renderable range.
    pub fn symbol(self) -> Option<NoteSymbol> {
        if !(Self::MIN_RENDERABLE..=Self::MAX_RENDERABLE).contains(&self.0) {
            return None;
        }
        let pitch_class = PitchClass::from_index(self.0.rem_euclid(12) as u8)?;
        let octave = (self.0.div_euclid(12) - 1) as i8;
        Some(NoteSymbol {
            pitch_class,
            octave,
        })
    }
}

/// A pitch-class name plus octave number, e.g. A4. Bijective with [`NoteId`]
/// over the renderable range.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NoteSymbol {
    pub pitch_class: PitchClass,
    pub octave: i8,
}

impl NoteSymbol {
    pub fn new(pitch_class: PitchClass, octave: i8) -> Result<Self, DomainError> {
        let symbol = Self {
            pitch_class,
            octave,
        };
        let id = symbol.note_id();
        if !(NoteId::MIN_RENDERABLE..=NoteId::MAX_RENDERABLE).contains(&id.semitone()) {
            return Err(DomainError::UnrenderableNote(id.semitone()));
        }
        Ok(symbol)
    }

    /// Inverse of [`NoteId::symbol`].
    pub fn note_id(self) -> NoteId {
        NoteId::new((self.octave as i32 + 1) * 12 + self.pitch_class.index() as i32)
    }
}

impl std::fmt::Display for NoteSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.pitch_class.label(), self.octave)
    }
}
