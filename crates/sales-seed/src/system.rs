use std::process::Command;

pub fn host_name() -> String {
    if let Ok(name) = std::env::var("HOSTNAME") {
        let name = name.trim();
        if !name.is_empty() {
            return name.to_string();
        }
    }
    if let Ok(output) = Command::new("uname").arg("-n").output() {
        let v = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !v.is_empty() {
            return v;
        }
    }
    "unknown-host".to_string()
}
