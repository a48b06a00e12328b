use specdeck_projects::ProjectRegistry;

pub fn execute(
    registry: &ProjectRegistry,
    project: &str,
    change: &str,
    json: bool,
) -> anyhow::Result<()> {
    let root = registry.resolve_root(project)?;
    let details =
        tokio::runtime::Runtime::new()?.block_on(specdeck_scan::change_details(&root, change))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
        return Ok(());
    }

    println!("{} [{}]", details.name, details.status);
    if !details.description.is_empty() {
        println!("{}", details.description);
    }

    print_section("Proposal", details.proposal_content.as_deref());
    print_section("Design", details.design_content.as_deref());
    print_section("Tasks", details.tasks_content.as_deref());
    print_section("Tests", details.tests_content.as_deref());
    print_section("Specs", details.specs_content.as_deref());

    if !details.spec_files.is_empty() {
        // Aggregation gives no ordering; sort for stable terminal output
        let mut files = details.spec_files;
        files.sort_by(|a, b| a.name.cmp(&b.name));
        println!("\n── Spec files ──");
        for f in &files {
            println!("\n• specs/{}\n{}", f.name, f.content.trim_end());
        }
    }
    Ok(())
}

fn print_section(title: &str, content: Option<&str>) {
    if let Some(content) = content {
        println!("\n── {title} ──");
        println!("{}", content.trim_end());
    }
}
