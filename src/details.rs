use crate::catalog::{Catalog, GradeError};
use crate::units::{convert_stress, StressUnit};

/// 상세 패널에 표시할 강종 한 건의 물성.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRecord {
    pub grade: &'static str,
    pub kind: &'static str,
    pub yield_strength_psi: u32,
    pub tensile_strength_psi: u32,
    pub elongation_pct: u32,
    pub carbon_content_pct: f64,
    /// ", "로 이어 붙인 용도 목록
    pub applications: String,
}

impl DetailRecord {
    /// 예: "36,000 psi", "248.2 MPa"
    pub fn yield_text(&self, unit: StressUnit) -> String {
        format_stress(self.yield_strength_psi, unit)
    }

    pub fn tensile_text(&self, unit: StressUnit) -> String {
        format_stress(self.tensile_strength_psi, unit)
    }

    pub fn elongation_text(&self) -> String {
        format!("{}%", self.elongation_pct)
    }

    pub fn carbon_text(&self) -> String {
        format!("{}%", self.carbon_content_pct)
    }
}

/// 선택 순서대로 상세 레코드를 만든다.
pub fn build_details(catalog: &Catalog, selected: &[&str]) -> Result<Vec<DetailRecord>, GradeError> {
    selected
        .iter()
        .map(|id| {
            let g = catalog.find(id)?;
            Ok(DetailRecord {
                grade: g.grade,
                kind: g.kind,
                yield_strength_psi: g.yield_strength_psi,
                tensile_strength_psi: g.tensile_strength_psi,
                elongation_pct: g.elongation_pct,
                carbon_content_pct: g.carbon_content_pct,
                applications: g.applications.join(", "),
            })
        })
        .collect()
}

/// psi 값을 표시 단위로 변환해 문자열로 만든다. psi는 천 단위 구분 기호를 붙인다.
pub fn format_stress(value_psi: u32, unit: StressUnit) -> String {
    match unit {
        StressUnit::Psi => format!("{} psi", group_thousands(u64::from(value_psi))),
        other => {
            let v = convert_stress(f64::from(value_psi), StressUnit::Psi, other);
            format!("{v:.1} {}", other.symbol())
        }
    }
}

/// 1234567 -> "1,234,567"
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(36_000), "36,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn record_projects_catalog_fields() {
        let cat = Catalog::builtin();
        let recs = build_details(&cat, &["A992"]).unwrap();
        let r = &recs[0];
        assert_eq!(r.kind, "Structural Steel");
        assert_eq!(r.applications, "Structural Shapes, I-Beams");
        assert_eq!(r.yield_text(StressUnit::Psi), "50,000 psi");
        assert_eq!(r.tensile_text(StressUnit::Ksi), "65.0 ksi");
        assert_eq!(r.elongation_text(), "21%");
        assert_eq!(r.carbon_text(), "0.23%");
    }

    #[test]
    fn empty_selection_has_no_records() {
        assert!(build_details(&Catalog::builtin(), &[]).unwrap().is_empty());
    }

    #[test]
    fn unknown_id_is_not_found() {
        let err = build_details(&Catalog::builtin(), &["A36", "X1"]).unwrap_err();
        assert_eq!(err, GradeError::NotFound("X1".into()));
    }
}
