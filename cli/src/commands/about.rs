//! About command.

pub const ABOUT: &str = "\
PortPeek - Network Port Monitor

Shows active network ports and the applications using them.

🟢 = Listening ports
🔵 = Established connections

Ports are discovered with `lsof -i -n -P`. If the list comes back empty or
access is refused, try running with admin privileges.";

pub fn show() {
    println!("{}", ABOUT);
    println!("\nVersion: {}", env!("CARGO_PKG_VERSION"));
}
