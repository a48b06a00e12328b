use specdeck_projects::ProjectRegistry;
use std::path::Path;

pub fn add(registry: &ProjectRegistry, id: &str, path: Option<&Path>) -> anyhow::Result<()> {
    registry.set(id, path)?;
    match path {
        Some(p) => println!("Registered {id} -> {}", p.display()),
        None => println!("Registered {id} (no path configured)"),
    }
    Ok(())
}

pub fn list(registry: &ProjectRegistry) -> anyhow::Result<()> {
    let projects = registry.list()?;
    if projects.is_empty() {
        println!("No projects registered.");
        return Ok(());
    }
    for (id, entry) in projects {
        match entry.path {
            Some(p) => println!("{id:<24} {}", p.display()),
            None => println!("{id:<24} (no path)"),
        }
    }
    Ok(())
}

pub fn remove(registry: &ProjectRegistry, id: &str) -> anyhow::Result<()> {
    registry.remove(id)?;
    println!("Removed {id}");
    Ok(())
}
