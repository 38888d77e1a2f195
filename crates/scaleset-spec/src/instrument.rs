//! Instrument descriptors and the General MIDI program catalog.

use serde::{Deserialize, Serialize};

use crate::error::EnumerationError;

/// Highest valid MIDI program number.
pub const MAX_PROGRAM: u8 = 127;

/// General MIDI instrument families, one per block of eight programs.
pub const GM_CATEGORIES: [&str; 16] = [
    "Piano",
    "Chromatic Percussion",
    "Organ",
    "Guitar",
    "Bass",
    "Strings",
    "Ensemble",
    "Brass",
    "Reed",
    "Pipe",
    "Synth Lead",
    "Synth Pad",
    "Synth Effects",
    "Ethnic",
    "Percussive",
    "Sound Effects",
];

/// General MIDI program names, indexed by program number.
pub const GM_PROGRAM_NAMES: [&str; 128] = [
    "Acoustic Grand Piano",
    "Bright Acoustic Piano",
    "Electric Grand Piano",
    "Honky-tonk Piano",
    "Electric Piano 1",
    "Electric Piano 2",
    "Harpsichord",
    "Clavinet",
    "Celesta",
    "Glockenspiel",
    "Music Box",
    "Vibraphone",
    "Marimba",
    "Xylophone",
    "Tubular Bells",
    "Dulcimer",
    "Drawbar Organ",
    "Percussive Organ",
    "Rock Organ",
    "Church Organ",
    "Reed Organ",
    "Accordion",
    "Harmonica",
    "Tango Accordion",
    "Acoustic Guitar (nylon)",
    "Acoustic Guitar (steel)",
    "Electric Guitar (jazz)",
    "Electric Guitar (clean)",
    "Electric Guitar (muted)",
    "Overdriven Guitar",
    "Distortion Guitar",
    "Guitar Harmonics",
    "Acoustic Bass",
    "Electric Bass (finger)",
    "Electric Bass (pick)",
    "Fretless Bass",
    "Slap Bass 1",
    "Slap Bass 2",
    "Synth Bass 1",
    "Synth Bass 2",
    "Violin",
    "Viola",
    "Cello",
    "Contrabass",
    "Tremolo Strings",
    "Pizzicato Strings",
    "Orchestral Harp",
    "Timpani",
    "String Ensemble 1",
    "String Ensemble 2",
    "Synth Strings 1",
    "Synth Strings 2",
    "Choir Aahs",
    "Voice Oohs",
    "Synth Voice",
    "Orchestra Hit",
    "Trumpet",
    "Trombone",
    "Tuba",
    "Muted Trumpet",
    "French Horn",
    "Brass Section",
    "Synth Brass 1",
    "Synth Brass 2",
    "Soprano Sax",
    "Alto Sax",
    "Tenor Sax",
    "Baritone Sax",
    "Oboe",
    "English Horn",
    "Bassoon",
    "Clarinet",
    "Piccolo",
    "Flute",
    "Recorder",
    "Pan Flute",
    "Blown Bottle",
    "Shakuhachi",
    "Whistle",
    "Ocarina",
    "Lead 1 (square)",
    "Lead 2 (sawtooth)",
    "Lead 3 (calliope)",
    "Lead 4 (chiff)",
    "Lead 5 (charang)",
    "Lead 6 (voice)",
    "Lead 7 (fifths)",
    "Lead 8 (bass + lead)",
    "Pad 1 (new age)",
    "Pad 2 (warm)",
    "Pad 3 (polysynth)",
    "Pad 4 (choir)",
    "Pad 5 (bowed)",
    "Pad 6 (metallic)",
    "Pad 7 (halo)",
    "Pad 8 (sweep)",
    "FX 1 (rain)",
    "FX 2 (soundtrack)",
    "FX 3 (crystal)",
    "FX 4 (atmosphere)",
    "FX 5 (brightness)",
    "FX 6 (goblins)",
    "FX 7 (echoes)",
    "FX 8 (sci-fi)",
    "Sitar",
    "Banjo",
    "Shamisen",
    "Koto",
    "Kalimba",
    "Bagpipe",
    "Fiddle",
    "Shanai",
    "Tinkle Bell",
    "Agogo",
    "Steel Drums",
    "Woodblock",
    "Taiko Drum",
    "Melodic Tom",
    "Synth Drum",
    "Reverse Cymbal",
    "Guitar Fret Noise",
    "Breath Noise",
    "Seashore",
    "Bird Tweet",
    "Telephone Ring",
    "Helicopter",
    "Applause",
    "Gunshot",
];

/// An instrument a row is rendered with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstrumentDescriptor {
    /// MIDI program number (0-127).
    pub program: u8,
    /// Display name, also used (sanitized) in file names.
    pub name: String,
    /// Instrument family.
    pub category: String,
}

impl InstrumentDescriptor {
    /// Creates and validates an instrument descriptor.
    pub fn new(
        program: u8,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, EnumerationError> {
        let instrument = Self {
            program,
            name: name.into(),
            category: category.into(),
        };
        instrument.validate()?;
        Ok(instrument)
    }

    /// Looks up a program in the General MIDI catalog.
    ///
    /// # Examples
    /// ```
    /// use scaleset_spec::InstrumentDescriptor;
    ///
    /// let violin = InstrumentDescriptor::general_midi(40).unwrap();
    /// assert_eq!(violin.name, "Violin");
    /// assert_eq!(violin.category, "Strings");
    /// ```
    pub fn general_midi(program: u8) -> Result<Self, EnumerationError> {
        if program > MAX_PROGRAM {
            return Err(EnumerationError::ProgramOutOfRange {
                name: format!("program {}", program),
                program,
            });
        }
        Ok(Self {
            program,
            name: GM_PROGRAM_NAMES[program as usize].to_string(),
            category: GM_CATEGORIES[(program / 8) as usize].to_string(),
        })
    }

    /// Checks the program range, that name and category are present, and
    /// that the name contains no path separator.
    pub fn validate(&self) -> Result<(), EnumerationError> {
        if self.program > MAX_PROGRAM {
            return Err(EnumerationError::ProgramOutOfRange {
                name: self.name.clone(),
                program: self.program,
            });
        }
        if self.name.trim().is_empty() {
            return Err(EnumerationError::MissingInstrumentField {
                program: self.program,
                field: "name",
            });
        }
        if self.name.contains(['/', '\\']) {
            return Err(EnumerationError::InvalidInstrumentName {
                program: self.program,
                name: self.name.clone(),
            });
        }
        if self.category.trim().is_empty() {
            return Err(EnumerationError::MissingInstrumentField {
                program: self.program,
                field: "category",
            });
        }
        Ok(())
    }

    /// Name with spaces replaced by underscores, as used in file names.
    pub fn sanitized_name(&self) -> String {
        sanitize_name(&self.name)
    }
}

/// Replace spaces with underscores.
pub fn sanitize_name(name: &str) -> String {
    name.replace(' ', "_")
}

/// The default instrument list: a single acoustic grand piano.
pub fn default_instruments() -> Vec<InstrumentDescriptor> {
    vec![InstrumentDescriptor {
        program: 0,
        name: "Acoustic Grand Piano".to_string(),
        category: "Piano".to_string(),
    }]
}
