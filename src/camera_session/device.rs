use crate::device_provider::interface::{DeviceKind, Facing, RawDevice, TrackSettings};

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceDescriptor {
    pub id: String,
    pub label: String,
    pub declared_facing: Option<Facing>,
}

fn facing_from_label(label: &str) -> Option<Facing> {
    let label = label.to_lowercase();
    if ["front", "user", "face"].iter().any(|word| label.contains(word)) {
        Some(Facing::Front)
    } else if ["back", "rear", "environment"]
        .iter()
        .any(|word| label.contains(word))
    {
        Some(Facing::Back)
    } else {
        None
    }
}

fn facing_rank(facing: Option<Facing>) -> u8 {
    match facing {
        Some(Facing::Front) => 0,
        Some(Facing::Back) => 1,
        None => 2,
    }
}

/// Keeps video inputs only, front cameras first, then back, then unknown.
pub fn describe_devices(raw: &[RawDevice]) -> Vec<DeviceDescriptor> {
    let mut devices: Vec<DeviceDescriptor> = raw
        .iter()
        .filter(|device| device.kind == DeviceKind::VideoInput)
        .map(|device| DeviceDescriptor {
            id: device.id.clone(),
            label: device.label.clone(),
            declared_facing: device.facing.or_else(|| facing_from_label(&device.label)),
        })
        .collect();

    devices.sort_by_key(|device| facing_rank(device.declared_facing));
    devices
}

pub fn describe_negotiated(settings: &TrackSettings, known: &[DeviceDescriptor]) -> DeviceDescriptor {
    match known.iter().find(|device| device.id == settings.device_id) {
        Some(device) => DeviceDescriptor {
            declared_facing: settings.facing.or(device.declared_facing),
            ..device.clone()
        },
        None => DeviceDescriptor {
            id: settings.device_id.clone(),
            label: String::new(),
            declared_facing: settings.facing,
        },
    }
}

pub fn pick_for_facing(devices: &[DeviceDescriptor], facing: Facing) -> Option<&DeviceDescriptor> {
    devices
        .iter()
        .find(|device| device.declared_facing == Some(facing))
        .or_else(|| devices.first())
}

pub fn distinct_count(devices: &[DeviceDescriptor]) -> usize {
    let mut ids: Vec<&str> = devices.iter().map(|device| device.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    ids.len()
}

/// The opposite-facing device when one is declared, otherwise the next one
/// in enumeration order.
pub fn switch_target(devices: &[DeviceDescriptor], current: &DeviceDescriptor) -> Option<DeviceDescriptor> {
    if devices.is_empty() {
        return None;
    }

    let opposite = current.declared_facing.map(Facing::opposite);
    let explicit = opposite.and_then(|wanted| {
        devices
            .iter()
            .find(|device| device.id != current.id && device.declared_facing == Some(wanted))
    });

    if let Some(device) = explicit {
        return Some(device.clone());
    }

    let start = devices
        .iter()
        .position(|device| device.id == current.id)
        .map_or(0, |index| index + 1);
    devices
        .iter()
        .cycle()
        .skip(start)
        .take(devices.len())
        .find(|device| device.id != current.id)
        .cloned()
}

pub fn display_label(devices: &[DeviceDescriptor], current: Option<&DeviceDescriptor>) -> String {
    let Some(current) = current else {
        return "Unknown Camera".to_string();
    };

    match current.declared_facing {
        Some(Facing::Front) => "Front Camera".to_string(),
        Some(Facing::Back) => "Back Camera".to_string(),
        None => {
            let index = devices.iter().position(|device| device.id == current.id);
            match index {
                Some(0) if devices.len() > 1 => "Front Camera".to_string(),
                Some(_) if devices.len() > 1 => "Back Camera".to_string(),
                _ if !current.label.is_empty() => current.label.clone(),
                Some(index) => format!("Camera {}", index + 1),
                None => "Unknown Camera".to_string(),
            }
        }
    }
}
