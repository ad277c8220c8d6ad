use propstage::{registry_from_manifest, PreviewError};
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: propstage-lint <manifest.yaml> [more.yaml ...]");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  propstage-lint components.yaml");
        eprintln!("  propstage-lint manifests/*.yaml");
        process::exit(1);
    }

    let mut exit_code = 0;
    let files: Vec<_> = args[1..].to_vec();

    for file_path in files {
        match lint_file(&file_path) {
            Ok(count) => {
                println!("✓ {} is valid ({} component{})", file_path, count, plural(count));
            }
            Err(e) => {
                eprintln!("✗ {} has errors:", file_path);
                print_error(&e);
                exit_code = 1;
            }
        }
    }

    process::exit(exit_code);
}

fn lint_file(path: &str) -> Result<usize, PreviewError> {
    let content = fs::read_to_string(path)
        .map_err(|e| PreviewError::ManifestError(format!("Failed to read file: {}", e)))?;
    let registry = registry_from_manifest(&content)?;
    Ok(registry.len())
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn print_error(error: &PreviewError) {
    match error {
        PreviewError::UnknownComponent { component } => {
            eprintln!("  Unknown component '{}':", component);
            eprintln!("    Not registered for preview");
        }
        PreviewError::DuplicateComponent { component } => {
            eprintln!("  Duplicate component '{}':", component);
            eprintln!("    Each component may only be declared once");
        }
        PreviewError::DuplicateProp { component, prop } => {
            eprintln!("  Duplicate prop '{}' for component '{}'", prop, component);
        }
        PreviewError::InvalidComponentName { name } => {
            eprintln!("  Invalid component name '{}':", name);
            eprintln!("    Must be identifier segments separated by '::'");
        }
        PreviewError::InvalidPropName { component, name } => {
            eprintln!("  Invalid prop name '{}' for component '{}':", name, component);
            eprintln!("    Must be a camelCase identifier");
        }
        PreviewError::UnknownPropType {
            component,
            prop,
            value,
        } => {
            eprintln!("  Unknown prop type '{}' for prop '{}' in component '{}':", value, prop, component);
            eprintln!("    Expected one of: string, text, number, boolean, color");
        }
        PreviewError::MissingChoices { component, prop } => {
            eprintln!("  Prop '{}' in component '{}' is a choice field but declares no choices", prop, component);
        }
        PreviewError::InvalidDefault {
            component,
            prop,
            reason,
        } => {
            eprintln!("  Invalid default for prop '{}' in component '{}':", prop, component);
            eprintln!("    {}", reason);
        }
        PreviewError::ManifestError(msg) => {
            eprintln!("  Manifest error:");
            eprintln!("    {}", msg);
        }
        PreviewError::YamlError(msg) => {
            eprintln!("  YAML error:");
            eprintln!("    {}", msg);
        }
    }
}
