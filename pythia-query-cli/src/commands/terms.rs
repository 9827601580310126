use anyhow::Result;
use clap::ValueEnum;
use pythia_query::query::TermDefinition;
use pythia_query::TermCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TermKind {
    Attributes,
    Operators,
    Locators,
}

/// List catalog terms, all kinds when none is given
pub fn run_terms(kind: Option<TermKind>) -> Result<()> {
    let catalog = TermCatalog::standard();
    let show = |k: TermKind| kind.map_or(true, |wanted| wanted == k);

    if show(TermKind::Attributes) {
        print_section("Document attributes", catalog.document_attributes());
        print_section("Token attributes", catalog.token_attributes());
        print_section("Structure attributes", catalog.structure_attributes());
    }
    if show(TermKind::Operators) {
        print_section("Operators", catalog.operators());
    }
    if show(TermKind::Locators) {
        print_section("Collocation operators", catalog.locators());
    }
    Ok(())
}

fn print_section(title: &str, terms: &[TermDefinition]) {
    println!("{}", title);
    println!("--------------------------------------------------------------------------------");
    for term in terms {
        let args: Vec<&str> = term
            .arg_definitions()
            .iter()
            .map(|a| a.code.as_str())
            .collect();
        let args = if args.is_empty() {
            String::new()
        } else {
            format!("({})", args.join(","))
        };
        println!(
            "  {:<16} {:<24} {}",
            format!("{}{}", term.code, args),
            term.label,
            term.group.as_deref().unwrap_or("")
        );
    }
    println!();
}
