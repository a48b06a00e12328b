use specdeck_core::Scope;
use specdeck_projects::ProjectRegistry;

pub fn execute(
    registry: &ProjectRegistry,
    project: &str,
    archived: bool,
    json: bool,
) -> anyhow::Result<()> {
    let root = registry.resolve_root(project)?;
    let scope = if archived {
        Scope::Archived
    } else {
        Scope::Active
    };
    let changes =
        tokio::runtime::Runtime::new()?.block_on(specdeck_scan::list_changes(&root, scope))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&changes)?);
        return Ok(());
    }

    if changes.is_empty() {
        println!("No changes found.");
        return Ok(());
    }

    for c in &changes {
        // Format: [2026-02-14 03:42] implementing  add-auth  "Token-based login."
        let ts = format_ts(&c.updated_at);
        if c.description.is_empty() {
            println!("[{ts}] {:<13} {}", c.status.as_str(), c.name);
        } else {
            println!(
                "[{ts}] {:<13} {}  \"{}\"",
                c.status.as_str(),
                c.name,
                c.description
            );
        }
    }
    println!("\n({} changes shown)", changes.len());
    Ok(())
}

fn format_ts(ts: &time::OffsetDateTime) -> String {
    let s = ts
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default();
    if s.len() >= 16 {
        // "2026-02-14T03:42:00Z" -> "2026-02-14 03:42"
        format!("{} {}", &s[..10], &s[11..16])
    } else {
        s
    }
}
