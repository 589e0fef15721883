use std::collections::HashSet;

use tracing::{debug, warn};

use crate::catalog::{Catalog, GradeError};

/// 검색어와 선택된 강종 목록을 담는 세션 상태.
///
/// 선택 목록은 선택한 순서를 유지하며 중복이 없다. 모든 식별자는 카탈로그에 존재한다.
/// 상태 변경은 [`SelectionState::set_search_term`]과 [`SelectionState::toggle`]로만 이루어진다.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    search_term: String,
    order: Vec<&'static str>,
    index: HashSet<&'static str>,
}

/// 토글 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, value: impl Into<String>) {
        self.search_term = value.into();
        debug!(term = %self.search_term, "search term updated");
    }

    /// 선택 순서대로의 식별자 목록.
    pub fn selected(&self) -> &[&'static str] {
        &self.order
    }

    pub fn selected_set(&self) -> &HashSet<&'static str> {
        &self.index
    }

    pub fn is_selected(&self, grade_id: &str) -> bool {
        self.index.contains(grade_id)
    }

    /// 선택되어 있으면 제거하고, 없으면 카탈로그 확인 후 끝에 추가한다.
    /// 카탈로그에 없는 식별자는 상태를 바꾸지 않고 `InvalidGrade`를 반환한다.
    pub fn toggle(&mut self, catalog: &Catalog, grade_id: &str) -> Result<Toggled, GradeError> {
        if self.index.remove(grade_id) {
            self.order.retain(|g| *g != grade_id);
            debug!(grade = grade_id, selected = ?self.order, "grade deselected");
            return Ok(Toggled::Removed);
        }
        let grade = catalog.find(grade_id).map_err(|_| {
            warn!(grade = grade_id, "rejected selection of unknown grade");
            GradeError::InvalidGrade(grade_id.to_string())
        })?;
        self.index.insert(grade.grade);
        self.order.push(grade.grade);
        debug!(grade = grade_id, selected = ?self.order, "grade selected");
        Ok(Toggled::Added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_appends_in_selection_order() {
        let cat = Catalog::builtin();
        let mut s = SelectionState::new();
        s.toggle(&cat, "A992").unwrap();
        s.toggle(&cat, "A36").unwrap();
        assert_eq!(s.selected(), &["A992", "A36"]);
        assert!(s.is_selected("A36"));
        assert!(!s.is_selected("A572-50"));
    }

    #[test]
    fn toggle_twice_restores_prior_order() {
        let cat = Catalog::builtin();
        let mut s = SelectionState::new();
        s.toggle(&cat, "A36").unwrap();
        s.toggle(&cat, "A572-50").unwrap();
        let before = s.selected().to_vec();
        assert_eq!(s.toggle(&cat, "A992").unwrap(), Toggled::Added);
        assert_eq!(s.toggle(&cat, "A992").unwrap(), Toggled::Removed);
        assert_eq!(s.selected(), before.as_slice());
    }

    #[test]
    fn unknown_grade_leaves_state_unchanged() {
        let cat = Catalog::builtin();
        let mut s = SelectionState::new();
        s.toggle(&cat, "A36").unwrap();
        let err = s.toggle(&cat, "a36").unwrap_err();
        assert_eq!(err, GradeError::InvalidGrade("a36".into()));
        assert_eq!(s.selected(), &["A36"]);
        assert_eq!(s.selected_set().len(), 1);
    }

    #[test]
    fn no_duplicates_after_many_toggles() {
        let cat = Catalog::builtin();
        let mut s = SelectionState::new();
        let seq = ["A36", "A992", "A36", "A572-50", "A36", "A992", "A992", "A572-50"];
        for id in seq {
            s.toggle(&cat, id).unwrap();
            let mut seen = HashSet::new();
            assert!(s.selected().iter().all(|g| seen.insert(*g)));
            assert_eq!(s.selected().len(), s.selected_set().len());
        }
        assert_eq!(s.selected(), &["A36", "A992"]);
    }
}
