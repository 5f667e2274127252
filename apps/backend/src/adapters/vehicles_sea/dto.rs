//! DTOs for vehicles_sea adapter.

/// DTO for creating a vehicle. Values are already validated.
#[derive(Debug, Clone)]
pub struct VehicleCreate {
    pub year: i32,
    pub make: String,
    pub model: String,
    pub vin: Option<String>,
    pub mileage: i64,
}

impl VehicleCreate {
    pub fn new(year: i32, make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            year,
            make: make.into(),
            model: model.into(),
            vin: None,
            mileage: 0,
        }
    }

    pub fn with_vin(mut self, vin: impl Into<String>) -> Self {
        self.vin = Some(vin.into());
        self
    }

    pub fn with_mileage(mut self, mileage: i64) -> Self {
        self.mileage = mileage;
        self
    }
}
