use serde::{Deserialize, Serialize};

/// 강도(응력) 단위. 내부 기준은 psi이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressUnit {
    Psi,
    Ksi,
    MegaPascal,
}

const PSI_PER_MPA: f64 = 145.037_737_7;

impl StressUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            StressUnit::Psi => "psi",
            StressUnit::Ksi => "ksi",
            StressUnit::MegaPascal => "MPa",
        }
    }
}

/// 주어진 강도를 psi로 변환한다.
pub fn to_psi(value: f64, unit: StressUnit) -> f64 {
    match unit {
        StressUnit::Psi => value,
        StressUnit::Ksi => value * 1000.0,
        StressUnit::MegaPascal => value * PSI_PER_MPA,
    }
}

/// psi 값을 원하는 단위로 변환한다.
pub fn from_psi(value_psi: f64, unit: StressUnit) -> f64 {
    match unit {
        StressUnit::Psi => value_psi,
        StressUnit::Ksi => value_psi / 1000.0,
        StressUnit::MegaPascal => value_psi / PSI_PER_MPA,
    }
}

/// 강도를 원하는 단위로 변환한다.
pub fn convert_stress(value: f64, from: StressUnit, to: StressUnit) -> f64 {
    from_psi(to_psi(value, from), to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a36_yield_in_mpa() {
        let mpa = convert_stress(36_000.0, StressUnit::Psi, StressUnit::MegaPascal);
        assert!((mpa - 248.2).abs() < 0.1, "mpa={mpa}");
        assert_eq!(convert_stress(50.0, StressUnit::Ksi, StressUnit::Psi), 50_000.0);
    }
}
