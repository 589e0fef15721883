use crate::catalog::{Catalog, SteelGrade};

/// 검색어가 식별자 또는 분류 문자열에 (대소문자 무시) 포함된 강종만 카탈로그 순서대로 반환한다.
/// 빈 검색어는 전체를 반환한다. 공백 제거 등 추가 정규화는 하지 않는다.
pub fn filter(catalog: &Catalog, search_term: &str) -> Vec<&'static SteelGrade> {
    let needle = search_term.to_lowercase();
    catalog
        .all()
        .iter()
        .filter(|g| matches(g, &needle))
        .collect()
}

fn matches(grade: &SteelGrade, needle_lower: &str) -> bool {
    needle_lower.is_empty()
        || grade.grade.to_lowercase().contains(needle_lower)
        || grade.kind.to_lowercase().contains(needle_lower)
}
