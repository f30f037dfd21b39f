//! Machine entity: the rental fleet.

use serde::{Deserialize, Serialize};

use arriendo_core::{DomainError, DomainResult, Entity, MachineId};

/// Lift mechanism of an elevation platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiftKind {
    #[serde(rename = "tijera")]
    Scissor,
    #[serde(rename = "brazo")]
    ArticulatedBoom,
}

/// Power source of an elevation platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelKind {
    #[serde(rename = "electrico")]
    Electric,
    #[serde(rename = "diesel")]
    Diesel,
}

/// Machine category, carrying only the technical fields that make sense for
/// that category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "categoria")]
pub enum MachineCategory {
    /// Equipment for work at height.
    #[serde(rename = "equipos_altura")]
    Elevation {
        #[serde(rename = "altura")]
        height_m: Option<f64>,
        #[serde(rename = "tipo_altura")]
        lift: Option<LiftKind>,
        #[serde(rename = "combustible")]
        fuel: Option<FuelKind>,
    },
    #[serde(rename = "camiones")]
    Truck {
        #[serde(rename = "tonelaje")]
        tonnage: Option<f64>,
    },
    /// Load-handling equipment (forklifts, telehandlers).
    #[serde(rename = "equipos_carga")]
    LoadEquipment {
        #[serde(rename = "carga")]
        capacity_kg: Option<f64>,
    },
}

impl MachineCategory {
    /// Every numeric spec field must be non-negative.
    fn validate(&self) -> DomainResult<()> {
        let spec_value = match self {
            Self::Elevation { height_m, .. } => *height_m,
            Self::Truck { tonnage } => *tonnage,
            Self::LoadEquipment { capacity_kg } => *capacity_kg,
        };
        match spec_value {
            Some(v) if v < 0.0 => Err(DomainError::validation(format!(
                "technical spec fields must be non-negative, got {v}"
            ))),
            _ => Ok(()),
        }
    }
}

/// Whether a machine can be rented out or is earmarked for sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "Disponible")]
    Available,
    #[serde(rename = "Para venta")]
    ForSale,
}

/// A machine in the fleet. The serial is the business key line items and
/// rental rows refer to; uniqueness across the fleet is enforced by the
/// backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Machine {
    id: MachineId,
    brand: String,
    model: Option<String>,
    serial: String,
    year: Option<i32>,
    description: Option<String>,
    category: MachineCategory,
    availability: Availability,
}

impl Machine {
    pub fn register(
        id: MachineId,
        brand: impl Into<String>,
        model: Option<String>,
        serial: impl Into<String>,
        category: MachineCategory,
    ) -> DomainResult<Self> {
        let brand = brand.into().trim().to_string();
        if brand.is_empty() {
            return Err(DomainError::validation("brand must not be empty"));
        }

        let serial = serial.into().trim().to_string();
        if serial.is_empty() {
            return Err(DomainError::validation("serial must not be empty"));
        }

        category.validate()?;

        Ok(Self {
            id,
            brand,
            model,
            serial,
            year: None,
            description: None,
            category,
            availability: Availability::Available,
        })
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn serial(&self) -> &str {
        &self.serial
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn category(&self) -> &MachineCategory {
        &self.category
    }

    pub fn availability(&self) -> Availability {
        self.availability
    }

    /// Short display label: brand plus model when present.
    pub fn display_name(&self) -> String {
        match &self.model {
            Some(model) => format!("{} {}", self.brand, model),
            None => self.brand.clone(),
        }
    }
}

impl Entity for Machine {
    type Id = MachineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scissor_lift() -> MachineCategory {
        MachineCategory::Elevation {
            height_m: Some(11.7),
            lift: Some(LiftKind::Scissor),
            fuel: Some(FuelKind::Electric),
        }
    }

    #[test]
    fn registers_an_elevation_machine() {
        let machine = Machine::register(
            MachineId::new(),
            "Genie",
            Some("GS-3246".to_string()),
            "GS4616A-110234",
            scissor_lift(),
        )
        .unwrap()
        .with_year(2019);

        assert_eq!(machine.display_name(), "Genie GS-3246");
        assert_eq!(machine.serial(), "GS4616A-110234");
        assert_eq!(machine.year(), Some(2019));
        assert_eq!(machine.availability(), Availability::Available);
    }

    #[test]
    fn rejects_blank_serial() {
        let err = Machine::register(MachineId::new(), "Genie", None, "  ", scissor_lift())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn rejects_negative_spec_fields() {
        let err = Machine::register(
            MachineId::new(),
            "Toyota",
            None,
            "8FGU25-88123",
            MachineCategory::LoadEquipment {
                capacity_kg: Some(-2500.0),
            },
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn category_serializes_with_legacy_tags() {
        let json = serde_json::to_value(scissor_lift()).unwrap();
        assert_eq!(json["categoria"], "equipos_altura");
        assert_eq!(json["tipo_altura"], "tijera");
        assert_eq!(json["combustible"], "electrico");

        let truck: MachineCategory =
            serde_json::from_str(r#"{"categoria":"camiones","tonelaje":12.5}"#).unwrap();
        assert_eq!(truck, MachineCategory::Truck { tonnage: Some(12.5) });
    }
}
