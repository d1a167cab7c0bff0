use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::view::ReservationView;

/// Print the whole page: locations, spots for the selected location,
/// duration/selection status, the user's reservations, and the error slot.
pub fn render(view: &ReservationView) {
    print_locations(view);
    print_spots(view);
    print_status(view);
    print_reservations(view);

    if let Some(error) = view.error() {
        println!("{}", error.red());
    }
    println!();
}

fn print_locations(view: &ReservationView) {
    println!("{}", "Parking locations:".bold());
    if view.locations().is_empty() {
        println!("  (none loaded)");
        return;
    }
    for location in view.locations() {
        if Some(location.sijainti.as_str()) == view.selected_location() {
            println!("  {}", location.sijainti.green().bold());
        } else {
            println!("  {}", location.sijainti);
        }
    }
}

fn print_spots(view: &ReservationView) {
    let Some(location) = view.selected_location() else {
        return;
    };
    println!("{} {}", "Spots at".bold(), location.bold());
    for spot in view.spots() {
        if Some(spot.id_parkit.as_str()) == view.selected_spot() {
            println!("  {}", spot.id_parkit.green().bold());
        } else if spot.vapaa {
            println!("  {}", spot.id_parkit);
        } else {
            println!("  {}", format!("{} (taken)", spot.id_parkit).dimmed());
        }
    }
}

fn print_status(view: &ReservationView) {
    let spot = view.selected_spot().unwrap_or("-");
    let duration = if view.duration_hours() > 0 {
        format!("{} h", view.duration_hours())
    } else {
        "-".to_string()
    };
    let ready = if view.can_submit() {
        "ready to reserve".green().to_string()
    } else {
        "pick a spot and duration".dimmed().to_string()
    };
    println!("Spot: {}  Duration: {}  ({})", spot, duration, ready);
}

fn print_reservations(view: &ReservationView) {
    println!("{}", "Your reservations:".bold());
    if view.reservations().is_empty() {
        println!("  (none)");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Location", "Spot", "Vehicle", "Start", "End"]);
    for reservation in view.reservations() {
        table.add_row(vec![
            reservation.id.clone(),
            reservation.sijainti.clone(),
            reservation.parkki.clone(),
            reservation.rekisteri.clone(),
            reservation.start_time.clone(),
            reservation.end_time.clone(),
        ]);
    }
    println!("{table}");
}

/// Command reference shown on `help` and on unknown input.
pub fn print_help() {
    println!("Commands:");
    println!("  locations         reload the location list");
    println!("  use <location>    select a location and load its spots");
    println!("  spot <id>         select a free spot");
    println!("  +  /  -           add or remove one hour of duration");
    println!("  reserve           submit the reservation");
    println!("  mine              refresh your reservation list");
    println!("  cancel <id>       cancel one of your reservations");
    println!("  help              show this help");
    println!("  quit              exit");
}
