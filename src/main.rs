use std::collections::HashSet;

use clap::Parser;
use steel_grade_comparison::{app, comparison::GradeComparison, config, i18n, logging};

/// 강종 물성 비교 CLI. 옵션 없이 실행하면 대화형 메뉴를 연다.
#[derive(Debug, Parser)]
#[command(name = "steel_grade_comparison_cli", version, about)]
struct Cli {
    /// 언어 (auto/en-us/ko-kr)
    #[arg(short = 'L', long, default_value = "auto")]
    lang: String,
    /// 초기 검색어 (식별자/분류 부분 일치, 대소문자 무시)
    #[arg(short, long)]
    search: Option<String>,
    /// 선택할 강종 (여러 번 지정 가능, 지정 순서 유지, 중복은 한 번만 선택)
    #[arg(short = 'g', long = "select", value_name = "GRADE")]
    select: Vec<String>,
    /// 선택된 강종의 해당 온도(표시 단위) 강도를 출력
    #[arg(long, value_name = "TEMP")]
    at: Option<f64>,
    /// 한 번 출력하고 종료
    #[arg(long)]
    list: bool,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    logging::init();
    let cli = Cli::parse();
    if let Err(err) = try_run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_run(cli: Cli) -> Result<(), app::AppError> {
    let mut cfg = config::load_or_default()?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());

    let mut comparison = GradeComparison::default();
    if let Some(term) = cli.search {
        comparison.set_search_term(term)?;
    }
    for id in unique_in_order(&cli.select) {
        comparison.toggle_grade(id)?;
    }

    if cli.list || !cli.select.is_empty() || cli.at.is_some() {
        app::run_once(&cfg, &tr, &comparison, cli.at)
    } else {
        app::run(&mut cfg, &tr, &mut comparison)
    }
}

/// 처음 나온 순서를 유지하며 중복을 제거한다. 같은 강종을 두 번 토글해 선택이 풀리지 않게 한다.
fn unique_in_order(ids: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    ids.iter()
        .map(String::as_str)
        .filter(|id| seen.insert(*id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_select_flags_keep_grade_selected() {
        let cli = Cli::parse_from(["cli", "--select", "A36", "-g", "A992", "--select", "A36"]);
        let ids = unique_in_order(&cli.select);
        assert_eq!(ids, vec!["A36", "A992"]);

        let mut cmp = GradeComparison::default();
        for id in ids {
            cmp.toggle_grade(id).unwrap();
        }
        assert_eq!(cmp.view().selected, &["A36", "A992"]);
    }
}
