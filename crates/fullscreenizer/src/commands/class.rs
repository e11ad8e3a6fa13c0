use fullscreenizer_core::config;
use fullscreenizer_windows::daemon::edit_config;

/// Adds a window class to the tracked set and persists the config.
pub fn add(class: &str) {
    if class.trim().is_empty() {
        eprintln!("Error: class name cannot be blank.");
        std::process::exit(1);
    }

    match edit_config(|config| {
        if !config.classes.iter().any(|c| c == class) {
            config.classes.push(class.to_string());
        }
    }) {
        Ok(config) => {
            println!("Tracking {} classes:", config.classes.len());
            for c in &config.classes {
                println!("  {c}");
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Removes a window class from the tracked set and persists the config.
pub fn remove(class: &str) {
    match edit_config(|config| {
        config.classes.retain(|c| c != class);
    }) {
        Ok(config) => {
            if config.classes.is_empty() {
                println!("No classes tracked.");
            } else {
                println!("Tracking {} classes:", config.classes.len());
                for c in &config.classes {
                    println!("  {c}");
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Prints the tracked classes from the config file.
pub fn list() {
    match config::load() {
        Ok(config) => {
            if config.classes.is_empty() {
                println!("No classes tracked. Add one with `fullscreenizer class add <name>`.");
            } else {
                for c in &config.classes {
                    println!("{c}");
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
