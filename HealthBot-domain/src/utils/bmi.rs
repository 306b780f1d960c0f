use serde::{Deserialize, Serialize};
use std::fmt;

/// Body mass index bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    /// BMI below 18.5
    Underweight,
    /// 18.5 up to (not including) 25
    #[serde(rename = "Normal weight")]
    NormalWeight,
    /// 25 up to (not including) 30
    Overweight,
    /// 30 and above
    Obese,
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BmiCategory::Underweight => write!(f, "Underweight"),
            BmiCategory::NormalWeight => write!(f, "Normal weight"),
            BmiCategory::Overweight => write!(f, "Overweight"),
            BmiCategory::Obese => write!(f, "Obese"),
        }
    }
}

/// Body mass index, `None` unless the height is positive
pub fn calculate_bmi(weight_kg: f64, height_m: f64) -> Option<f64> {
    if !(height_m > 0.0) {
        return None;
    }
    Some(weight_kg / (height_m * height_m))
}

/// Categorize a BMI value
pub fn get_bmi_category(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::NormalWeight
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_bmi() {
        let bmi = calculate_bmi(70.0, 1.75).unwrap();
        assert!((bmi - 22.857).abs() < 0.001);
    }

    #[test]
    fn test_non_positive_height_has_no_bmi() {
        assert_eq!(calculate_bmi(70.0, 0.0), None);
        assert_eq!(calculate_bmi(70.0, -1.6), None);
        assert_eq!(calculate_bmi(70.0, f64::NAN), None);
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(get_bmi_category(18.4), BmiCategory::Underweight);
        assert_eq!(get_bmi_category(18.5), BmiCategory::NormalWeight);
        assert_eq!(get_bmi_category(24.99), BmiCategory::NormalWeight);
        assert_eq!(get_bmi_category(25.0), BmiCategory::Overweight);
        assert_eq!(get_bmi_category(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(BmiCategory::NormalWeight.to_string(), "Normal weight");
        assert_eq!(get_bmi_category(35.2).to_string(), "Obese");
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&BmiCategory::NormalWeight).unwrap();
        assert_eq!(json, "\"Normal weight\"");
    }
}
