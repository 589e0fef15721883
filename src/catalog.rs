/// 강종(steel grade)별 기계적 성질과 온도-강도 테이블을 제공한다.
/// 값은 비교용 참고치이며 설계 시 최신 규격(ASTM 등)으로 검증해야 한다.
use thiserror::Error;

/// 온도 한 지점에서의 강도 값. 온도는 °F, 강도는 psi 기준이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempPoint {
    pub temp_f: i32,
    pub strength_psi: u32,
}

impl TempPoint {
    pub const fn new(temp_f: i32, strength_psi: u32) -> Self {
        Self {
            temp_f,
            strength_psi,
        }
    }
}

/// 카탈로그에 고정된 강종 한 건.
#[derive(Debug, PartialEq)]
pub struct SteelGrade {
    /// 카탈로그 내에서 유일한 식별자 (예: "A36")
    pub grade: &'static str,
    /// 분류 문자열 (예: "Carbon Steel")
    pub kind: &'static str,
    pub yield_strength_psi: u32,
    pub tensile_strength_psi: u32,
    pub elongation_pct: u32,
    pub carbon_content_pct: f64,
    pub applications: &'static [&'static str],
    /// temp_f 오름차순으로 정렬되어 있어야 한다.
    pub temperature_data: &'static [TempPoint],
}

/// 보간된 강도 값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthValue {
    pub strength_psi: f64,
    pub source_temp_f: f64,
    /// true면 테이블 범위 밖이라 가장자리 값으로 클램프됨을 의미한다.
    pub clamped: bool,
}

/// 강종 조회/선택 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradeError {
    /// 카탈로그에 없는 강종 조회
    #[error("grade not found in catalog: {0}")]
    NotFound(String),
    /// 카탈로그에 없는 강종 선택 시도
    #[error("invalid grade selection: {0}")]
    InvalidGrade(String),
}

/// 읽기 전용 강종 카탈로그. 정의 순서를 그대로 유지한다.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    grades: &'static [SteelGrade],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// 내장 데이터셋으로 카탈로그를 만든다.
    pub const fn builtin() -> Self {
        Self { grades: STEEL_GRADES }
    }

    #[cfg(test)]
    pub(crate) const fn from_static(grades: &'static [SteelGrade]) -> Self {
        Self { grades }
    }

    pub fn all(&self) -> &'static [SteelGrade] {
        self.grades
    }

    /// 식별자가 정확히 일치하는 강종을 찾는다. 대소문자를 구분한다.
    pub fn find(&self, grade_id: &str) -> Result<&'static SteelGrade, GradeError> {
        self.grades
            .iter()
            .find(|g| g.grade == grade_id)
            .ok_or_else(|| GradeError::NotFound(grade_id.to_string()))
    }

    /// 지정 온도(°F)에서의 강도를 온도 테이블에서 선형 보간한다.
    pub fn strength_at(&self, grade_id: &str, temp_f: f64) -> Result<StrengthValue, GradeError> {
        let grade = self.find(grade_id)?;
        interpolate(grade.temperature_data, temp_f)
            .ok_or_else(|| GradeError::NotFound(grade_id.to_string()))
    }
}

fn interpolate(points: &[TempPoint], temp_f: f64) -> Option<StrengthValue> {
    let first = points.first()?;
    let last = points.last()?;
    let edge = |p: &TempPoint| StrengthValue {
        strength_psi: f64::from(p.strength_psi),
        source_temp_f: f64::from(p.temp_f),
        clamped: true,
    };
    if points.len() == 1 || temp_f <= f64::from(first.temp_f) {
        return Some(edge(first));
    }
    if temp_f >= f64::from(last.temp_f) {
        return Some(edge(last));
    }
    for win in points.windows(2) {
        let (a_t, b_t) = (f64::from(win[0].temp_f), f64::from(win[1].temp_f));
        if temp_f >= a_t && temp_f <= b_t {
            let (a_s, b_s) = (
                f64::from(win[0].strength_psi),
                f64::from(win[1].strength_psi),
            );
            let frac = (temp_f - a_t) / (b_t - a_t);
            return Some(StrengthValue {
                strength_psi: a_s + frac * (b_s - a_s),
                source_temp_f: temp_f,
                clamped: false,
            });
        }
    }
    None
}

const STEEL_GRADES: &[SteelGrade] = &[
    SteelGrade {
        grade: "A36",
        kind: "Carbon Steel",
        yield_strength_psi: 36_000,
        tensile_strength_psi: 58_000,
        elongation_pct: 20,
        carbon_content_pct: 0.26,
        applications: &["Construction", "General Purpose"],
        temperature_data: &[
            tp(0, 40_000),
            tp(200, 38_000),
            tp(400, 35_000),
            tp(600, 30_000),
            tp(800, 25_000),
        ],
    },
    SteelGrade {
        grade: "A572-50",
        kind: "High-Strength Low-Alloy",
        yield_strength_psi: 50_000,
        tensile_strength_psi: 65_000,
        elongation_pct: 21,
        carbon_content_pct: 0.23,
        applications: &["Bridges", "Buildings"],
        temperature_data: &[
            tp(0, 52_000),
            tp(200, 50_000),
            tp(400, 47_000),
            tp(600, 42_000),
            tp(800, 35_000),
        ],
    },
    SteelGrade {
        grade: "A992",
        kind: "Structural Steel",
        yield_strength_psi: 50_000,
        tensile_strength_psi: 65_000,
        elongation_pct: 21,
        carbon_content_pct: 0.23,
        applications: &["Structural Shapes", "I-Beams"],
        temperature_data: &[
            tp(0, 52_000),
            tp(200, 50_000),
            tp(400, 46_000),
            tp(600, 41_000),
            tp(800, 34_000),
        ],
    },
];

const fn tp(temp_f: i32, strength_psi: u32) -> TempPoint {
    TempPoint::new(temp_f, strength_psi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_ids_are_unique() {
        let all = Catalog::builtin().all();
        for (i, a) in all.iter().enumerate() {
            assert!(
                all[i + 1..].iter().all(|b| b.grade != a.grade),
                "duplicate grade {}",
                a.grade
            );
        }
    }

    #[test]
    fn temperature_tables_are_sorted_and_non_empty() {
        for g in Catalog::builtin().all() {
            assert!(!g.temperature_data.is_empty(), "{}", g.grade);
            assert!(
                g.temperature_data.windows(2).all(|w| w[0].temp_f < w[1].temp_f),
                "{}",
                g.grade
            );
        }
    }

    #[test]
    fn interpolate_midpoint() {
        let v = Catalog::builtin().strength_at("A36", 300.0).unwrap();
        assert!((v.strength_psi - 36_500.0).abs() < 1e-9);
        assert!(!v.clamped);
    }

    #[test]
    fn interpolate_clamps_outside_table() {
        let cat = Catalog::builtin();
        let hot = cat.strength_at("A992", 1200.0).unwrap();
        assert!(hot.clamped);
        assert_eq!(hot.strength_psi, 34_000.0);
        assert_eq!(hot.source_temp_f, 800.0);
        let cold = cat.strength_at("A992", -40.0).unwrap();
        assert!(cold.clamped);
        assert_eq!(cold.strength_psi, 52_000.0);
    }

    #[test]
    fn strength_at_unknown_grade() {
        let err = Catalog::builtin().strength_at("X1", 100.0).unwrap_err();
        assert_eq!(err, GradeError::NotFound("X1".into()));
    }
}
