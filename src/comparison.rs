//! 강종 비교 화면의 상태와 파생 데이터.
//!
//! [`GradeComparison`]은 카탈로그와 [`SelectionState`]를 소유하고, 두 명령
//! (`set_search_term`, `toggle_grade`)이 실행될 때마다 필터 결과/차트 곡선/상세 레코드를
//! 동기적으로 전부 다시 계산한다. 화면 갱신은 [`Presenter`] 구현체가 담당한다.

use std::collections::HashSet;

use tracing::debug;

use crate::catalog::{Catalog, GradeError, SteelGrade};
use crate::details::{build_details, DetailRecord};
use crate::filter::filter;
use crate::selection::{SelectionState, Toggled};
use crate::series::{build_series, Series};

/// 파생 데이터를 받아 화면을 그리는 표시 계층.
pub trait Presenter {
    fn render(&mut self, view: &ComparisonView<'_>);
}

/// 한 번의 파생 계산 결과에 대한 읽기 전용 뷰.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonView<'a> {
    pub search_term: &'a str,
    pub filtered: &'a [&'static SteelGrade],
    pub series: &'a [Series],
    pub details: &'a [DetailRecord],
    /// 선택 순서대로의 식별자
    pub selected: &'a [&'static str],
    pub selected_set: &'a HashSet<&'static str>,
}

impl ComparisonView<'_> {
    pub fn is_selected(&self, grade_id: &str) -> bool {
        self.selected_set.contains(grade_id)
    }

    /// 선택이 비어 있으면 차트 대신 안내 문구를 보여줘야 한다.
    pub fn shows_placeholder(&self) -> bool {
        self.series.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
struct Derived {
    filtered: Vec<&'static SteelGrade>,
    series: Vec<Series>,
    details: Vec<DetailRecord>,
}

#[derive(Debug, Clone)]
pub struct GradeComparison {
    catalog: Catalog,
    state: SelectionState,
    derived: Derived,
    generation: u64,
}

impl Default for GradeComparison {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}

impl GradeComparison {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            state: SelectionState::new(),
            derived: Derived {
                filtered: filter(&catalog, ""),
                ..Derived::default()
            },
            generation: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// 지금까지 수행된 파생 계산 횟수.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_search_term(&mut self, value: impl Into<String>) -> Result<(), GradeError> {
        let mut next = self.state.clone();
        next.set_search_term(value);
        self.apply(next)
    }

    /// 선택을 토글한다. 카탈로그에 없는 식별자면 상태와 파생 데이터를 그대로 두고 오류를 반환한다.
    pub fn toggle_grade(&mut self, grade_id: &str) -> Result<Toggled, GradeError> {
        let mut next = self.state.clone();
        let toggled = next.toggle(&self.catalog, grade_id)?;
        self.apply(next)?;
        Ok(toggled)
    }

    pub fn view(&self) -> ComparisonView<'_> {
        ComparisonView {
            search_term: self.state.search_term(),
            filtered: &self.derived.filtered,
            series: &self.derived.series,
            details: &self.derived.details,
            selected: self.state.selected(),
            selected_set: self.state.selected_set(),
        }
    }

    pub fn render(&self, presenter: &mut dyn Presenter) {
        presenter.render(&self.view());
    }

    /// 새 상태로 전부 다시 계산한 뒤에만 상태와 파생 데이터를 함께 교체한다.
    fn apply(&mut self, next: SelectionState) -> Result<(), GradeError> {
        let selected = next.selected();
        let derived = Derived {
            filtered: filter(&self.catalog, next.search_term()),
            series: build_series(&self.catalog, selected)?,
            details: build_details(&self.catalog, selected)?,
        };
        self.state = next;
        self.derived = derived;
        self.generation += 1;
        debug!(
            generation = self.generation,
            filtered = self.derived.filtered.len(),
            series = self.derived.series.len(),
            "comparison re-derived"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<(Vec<&'static str>, Vec<&'static str>, bool)>,
    }

    impl Presenter for Recorder {
        fn render(&mut self, view: &ComparisonView<'_>) {
            self.frames.push((
                view.filtered.iter().map(|g| g.grade).collect(),
                view.series.iter().map(|s| s.name).collect(),
                view.shows_placeholder(),
            ));
        }
    }

    #[test]
    fn initial_view_lists_everything_with_placeholder() {
        let cmp = GradeComparison::default();
        let view = cmp.view();
        assert_eq!(view.filtered.len(), 3);
        assert!(view.shows_placeholder());
        assert!(view.details.is_empty());
        assert_eq!(cmp.generation(), 0);
    }

    #[test]
    fn every_command_re_derives() {
        let mut cmp = GradeComparison::default();
        cmp.set_search_term("").unwrap();
        cmp.set_search_term("").unwrap();
        cmp.toggle_grade("A36").unwrap();
        assert_eq!(cmp.generation(), 3);
    }

    #[test]
    fn rejected_toggle_keeps_previous_derivation() {
        let mut cmp = GradeComparison::default();
        cmp.toggle_grade("A36").unwrap();
        let gen = cmp.generation();
        assert!(cmp.toggle_grade("nope").is_err());
        assert_eq!(cmp.generation(), gen);
        assert_eq!(cmp.view().selected, &["A36"]);
    }

    #[test]
    fn presenter_receives_current_view() {
        let mut cmp = GradeComparison::default();
        let mut rec = Recorder::default();
        cmp.render(&mut rec);
        cmp.set_search_term("a9").unwrap();
        cmp.toggle_grade("A36").unwrap();
        cmp.render(&mut rec);
        assert_eq!(rec.frames[0].0, vec!["A36", "A572-50", "A992"]);
        assert!(rec.frames[0].2);
        // 필터에 걸러진 강종도 선택은 유지된다
        assert_eq!(rec.frames[1], (vec!["A992"], vec!["A36"], false));
    }

    #[test]
    fn failed_derivation_leaves_state_unchanged() {
        let full = Catalog::builtin();
        let mut state = SelectionState::new();
        state.toggle(&full, "A992").unwrap();
        // A36만 있는 카탈로그에서는 A992 곡선을 만들 수 없다
        let mut cmp = GradeComparison {
            catalog: Catalog::from_static(&full.all()[..1]),
            state,
            derived: Derived::default(),
            generation: 0,
        };
        let err = cmp.toggle_grade("A36").unwrap_err();
        assert_eq!(err, GradeError::NotFound("A992".into()));
        assert_eq!(cmp.view().selected, &["A992"]);
        assert_eq!(cmp.generation(), 0);
        assert!(cmp.set_search_term("a").is_err());
        assert_eq!(cmp.view().search_term, "");
    }
}
