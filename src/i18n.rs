use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;
use tracing::debug;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_TITLE: &str = "general.app_title";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_SEARCH: &str = "main_menu.search";
    pub const MAIN_MENU_TOGGLE: &str = "main_menu.toggle";
    pub const MAIN_MENU_STRENGTH_AT: &str = "main_menu.strength_at";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const SEARCH_PLACEHOLDER: &str = "search.placeholder";
    pub const PROMPT_SEARCH: &str = "prompt.search";
    pub const PROMPT_GRADE: &str = "prompt.grade";
    pub const PROMPT_TEMPERATURE: &str = "prompt.temperature";

    pub const LIST_HEADING: &str = "list.heading";
    pub const LIST_EMPTY: &str = "list.empty";
    pub const COMPARE_HEADING: &str = "compare.heading";
    pub const COMPARE_PLACEHOLDER: &str = "compare.placeholder";
    pub const AXIS_TEMPERATURE: &str = "axis.temperature";
    pub const AXIS_STRENGTH: &str = "axis.strength";

    pub const DETAIL_YIELD: &str = "detail.yield";
    pub const DETAIL_TENSILE: &str = "detail.tensile";
    pub const DETAIL_ELONGATION: &str = "detail.elongation";
    pub const DETAIL_CARBON: &str = "detail.carbon";
    pub const DETAIL_APPLICATIONS: &str = "detail.applications";

    pub const RESULT_STRENGTH_AT: &str = "result.strength_at";
    pub const RESULT_CLAMPED: &str = "result.clamped";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_UNIT_SYSTEM: &str = "settings.current_unit_system";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.to_lowercase().starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        if let Some(map) = &overrides {
            debug!(lang = lang_code, entries = map.len(), "language pack loaded");
        }
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 → 키 자체 순으로 폴백한다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        let builtin = match self.lang {
            Language::En => en(key),
            Language::Ko => ko(key).or_else(|| en(key)),
        };
        builtin.map(str::to_string).unwrap_or_else(|| key.to_string())
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" | "ko-kr" => Some("ko-kr".into()),
        "en" | "en-us" | "en-uk" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko-kr".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko-kr".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(code) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(code);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 맵(중첩 테이블은 점으로 연결).
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    let (base, _) = lang.split_once(['-', '_'])?;
    try_load(base)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_TITLE => "강종 비교 도구",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_SEARCH => "1) 검색어 변경",
        MAIN_MENU_TOGGLE => "2) 강종 선택/해제",
        MAIN_MENU_STRENGTH_AT => "3) 온도별 강도 조회",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        SEARCH_PLACEHOLDER => "강종 검색...",
        PROMPT_SEARCH => "검색어 (비우면 전체): ",
        PROMPT_GRADE => "강종 식별자: ",
        PROMPT_TEMPERATURE => "온도 값: ",
        LIST_HEADING => "선택 가능한 강종",
        LIST_EMPTY => "검색 결과가 없습니다.",
        COMPARE_HEADING => "물성 비교",
        COMPARE_PLACEHOLDER => "비교할 강종을 선택하세요",
        AXIS_TEMPERATURE => "온도",
        AXIS_STRENGTH => "강도",
        DETAIL_YIELD => "항복강도",
        DETAIL_TENSILE => "인장강도",
        DETAIL_ELONGATION => "연신율",
        DETAIL_CARBON => "탄소 함량",
        DETAIL_APPLICATIONS => "용도",
        RESULT_STRENGTH_AT => "보간 강도",
        RESULT_CLAMPED => "(테이블 범위 밖: 가장자리 값 사용)",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_UNIT_SYSTEM => "현재 단위 시스템:",
        SETTINGS_OPTIONS => "1) Imperial(°F/psi)  2) Imperial(°F/ksi)  3) SI(°C/MPa)",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "단위 시스템이 변경되었습니다:",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_TITLE => "Steel Grade Comparison Tool",
        APP_EXIT => "Exiting.",
        MAIN_MENU_SEARCH => "1) Change search term",
        MAIN_MENU_TOGGLE => "2) Select/deselect grade",
        MAIN_MENU_STRENGTH_AT => "3) Strength at temperature",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        SEARCH_PLACEHOLDER => "Search steel grades...",
        PROMPT_SEARCH => "Search term (empty = all): ",
        PROMPT_GRADE => "Grade id: ",
        PROMPT_TEMPERATURE => "Temperature value: ",
        LIST_HEADING => "Available Grades",
        LIST_EMPTY => "No matching grades.",
        COMPARE_HEADING => "Properties Comparison",
        COMPARE_PLACEHOLDER => "Select steel grades to compare properties",
        AXIS_TEMPERATURE => "Temperature",
        AXIS_STRENGTH => "Strength",
        DETAIL_YIELD => "Yield Strength",
        DETAIL_TENSILE => "Tensile Strength",
        DETAIL_ELONGATION => "Elongation",
        DETAIL_CARBON => "Carbon Content",
        DETAIL_APPLICATIONS => "Applications",
        RESULT_STRENGTH_AT => "Interpolated strength",
        RESULT_CLAMPED => "(outside table range: edge value used)",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_UNIT_SYSTEM => "Current unit system:",
        SETTINGS_OPTIONS => "1) Imperial(°F/psi)  2) Imperial(°F/ksi)  3) SI(°C/MPa)",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; unit system unchanged.",
        SETTINGS_SAVED => "Unit system changed to:",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flag_wins_over_config() {
        assert_eq!(resolve_language("ko", Some("en-us")), "ko-kr");
        assert_eq!(resolve_language("auto", Some("en")), "en-us");
    }

    #[test]
    fn korean_falls_back_to_english_then_key() {
        let tr = Translator::new("ko-kr");
        assert_eq!(tr.t(keys::DETAIL_YIELD), "항복강도");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
        assert_eq!(Translator::new("fr").language(), Language::En);
        assert_eq!(Translator::new("ko-kr").language_code(), "ko");
    }

    #[test]
    fn nested_pack_tables_flatten_to_dotted_keys() {
        let map = parse_toml_to_map("[compare]\nplaceholder = \"Pick one\"\n").unwrap();
        assert_eq!(map.get("compare.placeholder").map(String::as_str), Some("Pick one"));
    }
}
