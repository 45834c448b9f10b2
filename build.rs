use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

// Variables que la app lee con option_env! (ver src/config.rs)
const REQUIRED_KEYS: [&str; 2] = ["SUPABASE_URL", "SUPABASE_ANON_KEY"];

fn main() {
    let mut loaded: HashMap<String, String> = HashMap::new();
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                // KEY=VALUE, con o sin comillas
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim().trim_start_matches("export ").trim();
                    let value = value.trim().trim_matches('"').trim_matches('\'');

                    // La variable del entorno real tiene prioridad
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                    loaded.insert(key.to_string(), value.to_string());
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found. Copy .env.example to .env and set SUPABASE_URL / SUPABASE_ANON_KEY.");
    }

    for key in REQUIRED_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
        if env::var(key).is_err() && !loaded.contains_key(key) {
            println!("cargo:warning={} is not set; the client will not reach Supabase.", key);
        }
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env.example");
}
