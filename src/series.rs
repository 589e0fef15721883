//! 선택된 강종의 온도-강도 곡선 데이터를 만든다.

use crate::catalog::{Catalog, GradeError, TempPoint};

/// 8비트 RGB 색상.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// 곡선 색상 팔레트. 식별자 해시로 인덱싱하므로 재렌더링 시에도 색이 바뀌지 않는다.
pub const PALETTE: [Rgb; 8] = [
    Rgb(0x1f, 0x77, 0xb4),
    Rgb(0xff, 0x7f, 0x0e),
    Rgb(0x2c, 0xa0, 0x2c),
    Rgb(0xd6, 0x27, 0x28),
    Rgb(0x94, 0x67, 0xbd),
    Rgb(0x8c, 0x56, 0x4b),
    Rgb(0xe3, 0x77, 0xc2),
    Rgb(0x17, 0xbe, 0xcf),
];

/// 차트에 그릴 곡선 하나.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: &'static str,
    pub points: &'static [TempPoint],
    pub color: Rgb,
}

/// 온도 한 지점에서 각 곡선의 강도. `values`는 series 순서를 따른다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRow {
    pub temp_f: i32,
    pub values: Vec<Option<u32>>,
}

/// 식별자 → 팔레트 색상. FNV-1a(32bit) 해시를 사용한다.
pub fn color_for(grade_id: &str) -> Rgb {
    const OFFSET: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;
    let hash = grade_id
        .bytes()
        .fold(OFFSET, |h, b| (h ^ u32::from(b)).wrapping_mul(PRIME));
    PALETTE[hash as usize % PALETTE.len()]
}

/// 선택 순서대로 곡선을 만든다. 선택이 비어 있으면 빈 Vec을 반환하며,
/// 이 경우 화면 쪽에서 빈 차트 대신 안내 문구를 보여줘야 한다.
pub fn build_series(catalog: &Catalog, selected: &[&str]) -> Result<Vec<Series>, GradeError> {
    selected
        .iter()
        .map(|id| {
            let grade = catalog.find(id)?;
            Ok(Series {
                name: grade.grade,
                points: grade.temperature_data,
                color: color_for(grade.grade),
            })
        })
        .collect()
}

/// 곡선들을 온도별 행으로 펼친다. 온도는 모든 곡선의 샘플 지점 합집합을 오름차순으로 사용하고,
/// 해당 온도 샘플이 없는 곡선은 `None`이 된다.
pub fn chart_rows(series: &[Series]) -> Vec<ChartRow> {
    let mut temps: Vec<i32> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.temp_f))
        .collect();
    temps.sort_unstable();
    temps.dedup();
    temps
        .into_iter()
        .map(|temp_f| ChartRow {
            temp_f,
            values: series
                .iter()
                .map(|s| {
                    s.points
                        .iter()
                        .find(|p| p.temp_f == temp_f)
                        .map(|p| p.strength_psi)
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_are_stable_per_grade() {
        assert_eq!(color_for("A36"), color_for("A36"));
        assert!(PALETTE.contains(&color_for("A572-50")));
    }

    #[test]
    fn color_does_not_depend_on_selection_order() {
        let cat = Catalog::builtin();
        let a = build_series(&cat, &["A36", "A992"]).unwrap();
        let b = build_series(&cat, &["A992", "A36"]).unwrap();
        assert_eq!(a[0].color, b[1].color);
        assert_eq!(a[1].color, b[0].color);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let cat = Catalog::builtin();
        let err = build_series(&cat, &["A36", "Z9"]).unwrap_err();
        assert_eq!(err, GradeError::NotFound("Z9".into()));
    }

    #[test]
    fn chart_rows_pivot_by_temperature() {
        let cat = Catalog::builtin();
        let series = build_series(&cat, &["A992", "A36"]).unwrap();
        let rows = chart_rows(&series);
        assert_eq!(rows.len(), 5);
        assert_eq!(
            rows[2],
            ChartRow {
                temp_f: 400,
                values: vec![Some(46_000), Some(35_000)],
            }
        );
        assert!(chart_rows(&[]).is_empty());
    }
}
