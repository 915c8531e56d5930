use serde::{Deserialize, Serialize};

use crate::{DurationClass, PlantColor};

/// Identifier of the instrument voicing a plant's notes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentId(u32);

impl InstrumentId {
    /// Creates a new instrument identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Selectable plant within an instrument group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlantPreset {
    /// Duration class planted cells emit notes with.
    pub duration_class: DurationClass,
    /// Color token painted on planted cells.
    pub color: PlantColor,
}

/// Catalog entry grouping plant presets played by one instrument.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentGroup {
    /// Display name of the group.
    pub name: String,
    /// Instrument assigned to every plant in the group.
    pub instrument: InstrumentId,
    /// Ordered presets the player cycles through.
    pub options: Vec<PlantPreset>,
}

/// Fully resolved preset ready to be planted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectedPreset {
    /// Duration class planted cells emit notes with.
    pub duration_class: DurationClass,
    /// Color token painted on planted cells.
    pub color: PlantColor,
    /// Instrument of the owning group.
    pub instrument: InstrumentId,
}

/// Immutable catalog of plant presets grouped by instrument.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nursery {
    groups: Vec<InstrumentGroup>,
}

impl Nursery {
    /// Creates a nursery from ordered instrument groups.
    #[must_use]
    pub fn new(groups: Vec<InstrumentGroup>) -> Self {
        Self { groups }
    }

    /// Instrument groups in selection order.
    #[must_use]
    pub fn groups(&self) -> &[InstrumentGroup] {
        &self.groups
    }

    /// Number of instrument groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Reports whether the nursery has no instrument groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of presets offered by the group at `instrument_index`.
    #[must_use]
    pub fn option_count(&self, instrument_index: usize) -> usize {
        self.groups
            .get(instrument_index)
            .map_or(0, |group| group.options.len())
    }

    /// Resolves the preset at the provided selection indices.
    #[must_use]
    pub fn preset(&self, instrument_index: usize, plant_index: usize) -> Option<SelectedPreset> {
        let group = self.groups.get(instrument_index)?;
        let option = group.options.get(plant_index)?;
        Some(SelectedPreset {
            duration_class: option.duration_class,
            color: option.color,
            instrument: group.instrument,
        })
    }

    /// First instrument listed, used for cells that never held a plant.
    #[must_use]
    pub fn default_instrument(&self) -> InstrumentId {
        self.groups
            .first()
            .map_or(InstrumentId::new(0), |group| group.instrument)
    }

    /// Name of the group that plays `instrument`.
    #[must_use]
    pub fn instrument_name(&self, instrument: InstrumentId) -> Option<&str> {
        self.groups
            .iter()
            .find(|group| group.instrument == instrument)
            .map(|group| group.name.as_str())
    }
}

impl Default for Nursery {
    fn default() -> Self {
        let options = |colors: [PlantColor; 4]| -> Vec<PlantPreset> {
            DurationClass::ALL
                .into_iter()
                .zip(colors)
                .map(|(duration_class, color)| PlantPreset {
                    duration_class,
                    color,
                })
                .collect()
        };

        Self::new(vec![
            InstrumentGroup {
                name: "Synths".to_owned(),
                instrument: InstrumentId::new(0),
                options: options([
                    PlantColor::from_rgb(0xad, 0x14, 0x57),
                    PlantColor::from_rgb(0xd8, 0x1b, 0x60),
                    PlantColor::from_rgb(0xec, 0x40, 0x7a),
                    PlantColor::from_rgb(0xf4, 0x8f, 0xb1),
                ]),
            },
            InstrumentGroup {
                name: "Drums".to_owned(),
                instrument: InstrumentId::new(1),
                options: options([
                    PlantColor::from_rgb(0x22, 0x8b, 0x22),
                    PlantColor::from_rgb(0x00, 0xff, 0x00),
                    PlantColor::from_rgb(0x90, 0xee, 0x90),
                    PlantColor::from_rgb(0xb8, 0xf5, 0xc0),
                ]),
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_nursery_offers_every_duration_per_instrument() {
        let nursery = Nursery::default();
        assert_eq!(nursery.len(), 2);
        for (index, group) in nursery.groups().iter().enumerate() {
            assert_eq!(nursery.option_count(index), 4);
            let classes: Vec<_> = group
                .options
                .iter()
                .map(|option| option.duration_class)
                .collect();
            assert_eq!(classes, DurationClass::ALL.to_vec());
        }
    }

    #[test]
    fn preset_resolves_group_instrument() {
        let nursery = Nursery::default();
        let preset = nursery.preset(1, 2).expect("drums quarter note");
        assert_eq!(preset.instrument, InstrumentId::new(1));
        assert_eq!(preset.duration_class, DurationClass::Quarter);
        assert_eq!(preset.color, PlantColor::from_rgb(0x90, 0xee, 0x90));
        assert!(nursery.preset(2, 0).is_none());
        assert!(nursery.preset(0, 4).is_none());
    }

    #[test]
    fn instrument_names_are_looked_up_by_id() {
        let nursery = Nursery::default();
        assert_eq!(nursery.instrument_name(InstrumentId::new(1)), Some("Drums"));
        assert_eq!(nursery.instrument_name(InstrumentId::new(9)), None);
    }
}
