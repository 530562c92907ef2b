//! Text rendering of the build summary.

use std::io::{self, Write};

use crate::config_file::{GeneralConfig, MachineConfig};
use crate::types::{FieldValue, Shown};

/// Rule between the report's header blocks
pub const SECTION_RULE: &str = "==========================================================";
/// Rule closing each machine block
pub const MACHINE_RULE: &str = "----------------------------------------------------------";
/// Indentation used for nested entries (customizations, playbook)
pub const NESTED_PREFIX: &str = "    | ";

/// Write the full report for `general` and `machines` to `out`.
///
/// A missing general record renders like one with every field absent.
pub fn render<W: Write>(
    general: Option<&GeneralConfig>,
    machines: &[MachineConfig],
    out: &mut W,
) -> io::Result<()> {
    let fallback = GeneralConfig::default();
    let general = general.unwrap_or(&fallback);

    render_general(general, out)?;

    writeln!(out, "Machine Configuration")?;
    writeln!(out, "{}", SECTION_RULE)?;
    for machine in machines {
        render_machine(general, machine, out)?;
    }

    writeln!(out)?;
    Ok(())
}

/// Render the report into a `String`.
pub fn render_to_string(general: Option<&GeneralConfig>, machines: &[MachineConfig]) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = render(general, machines, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// `hostname.domain.tld`, dots included even when parts are empty
pub fn fqdn(hostname: Option<&FieldValue>, general: &GeneralConfig) -> String {
    format!(
        "{}.{}.{}",
        Shown(hostname),
        Shown(general.domain.as_ref()),
        Shown(general.tld.as_ref())
    )
}

fn render_general<W: Write>(general: &GeneralConfig, out: &mut W) -> io::Result<()> {
    let tld = Shown(general.tld.as_ref());

    writeln!(out, "Build Summary:")?;
    writeln!(out, "{}", SECTION_RULE)?;
    writeln!(out, "General Project Configuration")?;
    writeln!(out, "{}", SECTION_RULE)?;
    writeln!(out, "TLD => .{}", tld)?;
    writeln!(
        out,
        "Project Domain => {}.{}",
        Shown(general.domain.as_ref()),
        tld
    )?;
    writeln!(out, "Project Prefix => {}", Shown(general.project.as_ref()))?;
    writeln!(out, "{}", SECTION_RULE)
}

fn render_machine<W: Write>(
    general: &GeneralConfig,
    machine: &MachineConfig,
    out: &mut W,
) -> io::Result<()> {
    let field = |value: &Option<FieldValue>| Shown(value.as_ref()).to_string();

    writeln!(out, "Machine Name => {}", field(&machine.name))?;
    writeln!(out, "Description => {}", field(&machine.description))?;
    writeln!(out, "Enabled => {}", field(&machine.enabled))?;
    writeln!(out, "Primary => {}", field(&machine.primary))?;
    writeln!(out, "Box Type => {}", field(&machine.box_name))?;
    writeln!(out, "Box URL => {}", field(&machine.box_url))?;
    // Linked Clone has always echoed the box URL; see DESIGN.md
    writeln!(out, "Linked Clone => {}", field(&machine.box_url))?;
    writeln!(out, "Hostname => {}", field(&machine.hostname))?;
    writeln!(out, "FQDN => {}", fqdn(machine.hostname.as_ref(), general))?;
    writeln!(out, "CPUs => {}", field(&machine.cpus))?;
    writeln!(out, "Memory => {}", field(&machine.memory))?;
    writeln!(out, "Enable GUI => {}", field(&machine.gui))?;

    writeln!(out, "Customizations")?;
    for vm_mod in &machine.vm_mods {
        writeln!(
            out,
            "{}{} => {}",
            NESTED_PREFIX,
            field(&vm_mod.option),
            field(&vm_mod.value)
        )?;
    }

    writeln!(out, "Private IP => {}", field(&machine.private_ip))?;

    if machine.provisioned() {
        writeln!(out, "Provisioning Options")?;
        writeln!(
            out,
            "{}Playbook => {}",
            NESTED_PREFIX,
            field(&machine.playbook)
        )?;
    }

    writeln!(out, "{}", MACHINE_RULE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VmMod;

    fn general() -> GeneralConfig {
        GeneralConfig {
            tld: Some(FieldValue::from("dev")),
            domain: Some(FieldValue::from("example")),
            project: Some(FieldValue::from("acme")),
        }
    }

    fn web1() -> MachineConfig {
        MachineConfig {
            name: Some(FieldValue::from("web1")),
            hostname: Some(FieldValue::from("web1")),
            cpus: Some(FieldValue::from(2)),
            memory: Some(FieldValue::from(1024)),
            vm_mods: vec![VmMod::new("cfg.vm.boot_timeout", 600)],
            provision: Some(FieldValue::from(true)),
            playbook: Some(FieldValue::from("site.yml")),
            private_ip: Some(FieldValue::from("10.0.0.5")),
            ..Default::default()
        }
    }

    #[test]
    fn test_general_block() {
        let report = render_to_string(Some(&general()), &[]);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "Build Summary:");
        assert_eq!(lines[4], "TLD => .dev");
        assert_eq!(lines[5], "Project Domain => example.dev");
        assert_eq!(lines[6], "Project Prefix => acme");
    }

    #[test]
    fn test_zero_machines() {
        let report = render_to_string(Some(&general()), &[]);
        assert!(report.ends_with(&format!("Machine Configuration\n{}\n\n", SECTION_RULE)));
        assert_eq!(report.lines().count(), 11);
    }

    #[test]
    fn test_machine_block() {
        let report = render_to_string(Some(&general()), &[web1()]);
        assert!(report.contains("FQDN => web1.example.dev\n"));
        assert!(report.contains("Customizations\n    | cfg.vm.boot_timeout => 600\n"));
        assert!(report.contains("Provisioning Options\n    | Playbook => site.yml\n"));
        assert!(report.contains("CPUs => 2\nMemory => 1024\n"));
        assert!(report.contains(&format!("Playbook => site.yml\n{}\n", MACHINE_RULE)));
    }

    #[test]
    fn test_linked_clone_echoes_box_url() {
        let machine = MachineConfig {
            box_url: Some(FieldValue::from("https://boxes.example/base")),
            ..Default::default()
        };
        let report = render_to_string(None, &[machine]);
        assert!(report.contains("Box URL => https://boxes.example/base\n"));
        assert!(report.contains("Linked Clone => https://boxes.example/base\n"));
    }

    #[test]
    fn test_fqdn_keeps_dots_when_empty() {
        let host = FieldValue::from("web1");
        assert_eq!(fqdn(Some(&host), &GeneralConfig::default()), "web1..");
        assert_eq!(fqdn(None, &GeneralConfig::default()), "..");
    }

    #[test]
    fn test_missing_general_renders_empty() {
        let report = render_to_string(None, &[]);
        assert!(report.contains("TLD => .\n"));
        assert!(report.contains("Project Domain => .\n"));
        assert!(report.contains("Project Prefix => \n"));
    }

    #[test]
    fn test_no_vm_mods_goes_straight_to_private_ip() {
        let machine = MachineConfig {
            private_ip: Some(FieldValue::from("10.0.0.9")),
            ..Default::default()
        };
        let report = render_to_string(Some(&general()), &[machine]);
        assert!(report.contains("Customizations\nPrivate IP => 10.0.0.9\n"));
        assert!(!report.contains("Provisioning Options"));
    }

    #[test]
    fn test_falsy_provision_skips_block() {
        let machine = MachineConfig {
            provision: Some(FieldValue::from(false)),
            playbook: Some(FieldValue::from("site.yml")),
            ..Default::default()
        };
        let report = render_to_string(None, &[machine]);
        assert!(!report.contains("Playbook"));
    }
}
