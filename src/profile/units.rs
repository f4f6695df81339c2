//! Conversion of physical quantities into display units.

/// A physical quantity measured by a field, in its metric base unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quantity {
    /// Metres travelled.
    Distance,
    /// Metres above sea level.
    Altitude,
    /// Metres per second.
    Speed,
    /// Degrees Celsius.
    Temperature,
    /// Kilograms.
    Weight,
    /// Metres of body length.
    Length,
    /// Semicircles of latitude or longitude.
    Position,
}

/// The display unit system applied to measured quantities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UnitSystem {
    #[default]
    Metric,
    Statute,
}

const METRES_PER_MILE: f64 = 1609.344;
const FEET_PER_METRE: f64 = 3.280_839_895;
const POUNDS_PER_KILOGRAM: f64 = 2.204_622_621_8;
const SEMICIRCLES_PER_DEGREE: f64 = 2_147_483_648.0 / 180.0;

impl UnitSystem {
    /// Convert a metric base value to this system, returning it with its unit.
    pub fn convert(self, quantity: Quantity, value: f64) -> (f64, &'static str) {
        let value = match (self, quantity) {
            (_, Quantity::Position) => value / SEMICIRCLES_PER_DEGREE,
            (Self::Metric, _) => value,
            (Self::Statute, Quantity::Distance) => value / METRES_PER_MILE,
            (Self::Statute, Quantity::Altitude | Quantity::Length) => value * FEET_PER_METRE,
            (Self::Statute, Quantity::Speed) => value * 3600.0 / METRES_PER_MILE,
            (Self::Statute, Quantity::Temperature) => value * 9.0 / 5.0 + 32.0,
            (Self::Statute, Quantity::Weight) => value * POUNDS_PER_KILOGRAM,
        };

        (value, self.unit(quantity))
    }

    pub fn unit(self, quantity: Quantity) -> &'static str {
        match (self, quantity) {
            (_, Quantity::Position) => "degrees",
            (Self::Metric, Quantity::Distance | Quantity::Altitude | Quantity::Length) => "m",
            (Self::Metric, Quantity::Speed) => "m/s",
            (Self::Metric, Quantity::Temperature) => "C",
            (Self::Metric, Quantity::Weight) => "kg",
            (Self::Statute, Quantity::Distance) => "mi",
            (Self::Statute, Quantity::Altitude | Quantity::Length) => "ft",
            (Self::Statute, Quantity::Speed) => "mph",
            (Self::Statute, Quantity::Temperature) => "F",
            (Self::Statute, Quantity::Weight) => "lbs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        let d = a - b;
        -1e-6 < d && d < 1e-6
    }

    #[test]
    fn metric_is_identity() {
        assert_eq!(UnitSystem::Metric.convert(Quantity::Distance, 1234.5), (1234.5, "m"));
        assert_eq!(UnitSystem::Metric.convert(Quantity::Temperature, -4.0), (-4.0, "C"));
    }

    #[test]
    fn statute_conversions() {
        let (miles, unit) = UnitSystem::Statute.convert(Quantity::Distance, 1609.344);
        assert!(close(miles, 1.0));
        assert_eq!(unit, "mi");

        let (fahrenheit, _) = UnitSystem::Statute.convert(Quantity::Temperature, 100.0);
        assert!(close(fahrenheit, 212.0));

        let (mph, _) = UnitSystem::Statute.convert(Quantity::Speed, 1609.344 / 3600.0);
        assert!(close(mph, 1.0));
    }

    #[test]
    fn position_ignores_unit_system() {
        let semicircles = 2_147_483_648.0 / 4.0;

        for system in [UnitSystem::Metric, UnitSystem::Statute] {
            let (degrees, unit) = system.convert(Quantity::Position, semicircles);
            assert!(close(degrees, 45.0));
            assert_eq!(unit, "degrees");
        }
    }
}
