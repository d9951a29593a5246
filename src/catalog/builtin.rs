//! Shipped appliance table.

use super::types::{ApplianceDefinition, Category};

fn standard(id: &str, name: &str, wattage: f64, surge: f64, category: Category) -> ApplianceDefinition {
    ApplianceDefinition {
        id: id.to_string(),
        name: name.to_string(),
        wattage,
        surge_multiplier: surge,
        category,
        is_heavy_duty: false,
        solo_only: false,
    }
}

fn heavy(id: &str, name: &str, wattage: f64, surge: f64, solo_only: bool) -> ApplianceDefinition {
    ApplianceDefinition {
        id: id.to_string(),
        name: name.to_string(),
        wattage,
        surge_multiplier: surge,
        category: Category::HeavyDuty,
        is_heavy_duty: true,
        solo_only,
    }
}

/// Returns the built-in appliance definitions in display order.
pub fn appliances() -> Vec<ApplianceDefinition> {
    use Category::{Cooling, Entertainment, Kitchen, Lighting, Office};

    vec![
        // Under 500 W
        standard("led_bulb", "LED Bulb (9W)", 9.0, 1.0, Lighting),
        standard("fluorescent", "Fluorescent Tube", 40.0, 1.2, Lighting),
        standard("outdoor_light", "Outdoor Light", 60.0, 1.0, Lighting),
        standard("tv_32", "LED TV 32\"", 50.0, 1.0, Entertainment),
        standard("tv_55", "LED TV 55\"", 120.0, 1.0, Entertainment),
        standard("sound_system", "Sound System", 100.0, 1.5, Entertainment),
        standard("gaming_console", "Gaming Console", 200.0, 1.0, Entertainment),
        standard("decoder", "Cable/Satellite Decoder", 25.0, 1.0, Entertainment),
        standard("blender", "Blender", 400.0, 3.0, Kitchen),
        standard("ceiling_fan", "Ceiling Fan", 75.0, 1.5, Cooling),
        standard("standing_fan", "Standing Fan", 55.0, 1.5, Cooling),
        standard("laptop", "Laptop", 65.0, 1.0, Office),
        standard("desktop", "Desktop Computer", 250.0, 1.5, Office),
        standard("printer", "Printer", 150.0, 2.0, Office),
        standard("router", "WiFi Router", 15.0, 1.0, Office),
        standard("phone_charger", "Phone Charger", 10.0, 1.0, Office),
        // 500 W and above
        heavy("ac_1hp", "Air Conditioner 1 HP", 900.0, 3.0, false),
        heavy("ac_15hp", "Air Conditioner 1.5 HP", 1200.0, 3.0, false),
        heavy("ac_2hp", "Air Conditioner 2 HP", 1800.0, 3.0, true),
        heavy("refrigerator", "Refrigerator", 500.0, 3.0, false),
        heavy("freezer", "Deep Freezer", 600.0, 3.0, false),
        heavy("microwave", "Microwave Oven", 1200.0, 2.0, false),
        heavy("electric_kettle", "Electric Kettle", 1500.0, 1.0, true),
        heavy("washing_machine", "Washing Machine", 700.0, 3.0, false),
        heavy("iron", "Electric Iron", 1200.0, 1.0, true),
        heavy("water_pump", "Water Pump (1HP)", 750.0, 3.0, true),
        heavy("space_heater", "Space Heater", 1500.0, 1.0, true),
        heavy("toaster", "Toaster", 800.0, 1.0, false),
        heavy("vacuum", "Vacuum Cleaner", 1000.0, 2.0, false),
    ]
}
