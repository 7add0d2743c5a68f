use super::*;

fn event(kind: EventKind) -> SpaceWeatherEvent {
    SpaceWeatherEvent::default().with_kind(kind)
}

#[test]
fn cards_show_kind_specific_detail() {
    let mut cme = event(EventKind::Cme);
    cme.start_time = Some("2024-05-10T06:36Z".to_string());
    cme.source_location = Some("S17W29".to_string());
    let card = EventCard::for_event(&cme);
    assert_eq!(card.title, "Coronal Mass Ejection (CME)");
    assert_eq!(
        card.lines,
        vec![
            ("Time", "2024-05-10T06:36Z".to_string()),
            ("Source", "S17W29".to_string()),
        ]
    );

    let mut flr = event(EventKind::Flr);
    flr.class_type = Some("M1.2".to_string());
    assert_eq!(EventCard::for_event(&flr).lines[1], ("Class", "M1.2".to_string()));

    let mut ips = event(EventKind::Ips);
    ips.location = Some("Earth".to_string());
    assert_eq!(EventCard::for_event(&ips).lines[1], ("Location", "Earth".to_string()));

    let gst = event(EventKind::Gst);
    assert_eq!(EventCard::for_event(&gst).lines[1], ("Link", "N/A".to_string()));
}

#[test]
fn missing_values_render_as_na() {
    let card = EventCard::for_event(&SpaceWeatherEvent::default());
    assert_eq!(card.title, "Unknown Event");
    assert_eq!(card.to_string(), "Unknown Event\nTime: N/A\nLink: N/A\n");
}

#[test]
fn display_lists_lines_under_title() {
    let mut gst = event(EventKind::Gst);
    gst.start_time = Some("2024-05-10T15:00Z".to_string());
    gst.link = Some("https://example.test/gst".to_string());
    assert_eq!(
        EventCard::for_event(&gst).to_string(),
        "Geomagnetic Storm (GST)\nTime: 2024-05-10T15:00Z\nLink: https://example.test/gst\n"
    );
}

#[test]
fn detailed_flare_lists_every_field() {
    let mut flr = event(EventKind::Flr);
    flr.flr_id = Some("2024-05-10T06:27:00-FLR-001".to_string());
    flr.class_type = Some("X3.9".to_string());
    flr.begin_time = Some("2024-05-10T06:27Z".to_string());
    flr.peak_time = Some("2024-05-10T06:54Z".to_string());
    flr.source_location = Some("S17W29".to_string());
    flr.active_region_num = Some(13664);

    assert_eq!(
        EventCard::detailed(&flr).to_string(),
        "SOLAR FLARE\n\
         ID: 2024-05-10T06:27:00-FLR-001\n\
         Class: X3.9\n\
         Begin Time: 2024-05-10T06:27Z\n\
         Peak Time: 2024-05-10T06:54Z\n\
         Source Location: S17W29\n\
         Active Region: 13664\n\
         Link: N/A\n"
    );
}

#[test]
fn detailed_fallbacks_follow_kind() {
    let flr = EventCard::detailed(&event(EventKind::Flr));
    assert_eq!(flr.lines[1], ("Class", "Unknown".to_string()));
    assert_eq!(flr.lines[5], ("Active Region", "N/A".to_string()));

    let mut cme = event(EventKind::Cme);
    cme.note = Some("Halo CME.".to_string());
    let labels: Vec<_> = EventCard::detailed(&cme).lines.iter().map(|(l, _)| *l).collect();
    assert_eq!(labels, ["ID", "Start Time", "Source Location", "Note", "Link"]);
    assert_eq!(EventCard::detailed(&cme).lines[3].1, "Halo CME.");

    let mut ips = event(EventKind::Ips);
    ips.event_time = Some("2024-05-10T16:36Z".to_string());
    ips.catalog = Some("M2M_CATALOG".to_string());
    let card = EventCard::detailed(&ips);
    assert_eq!(card.title, "INTERPLANETARY SHOCK");
    assert_eq!(card.lines[1], ("Start Time", "2024-05-10T16:36Z".to_string()));
    assert_eq!(card.lines[3], ("Catalog", "M2M_CATALOG".to_string()));

    let mut mpc = event(EventKind::Mpc);
    mpc.mpc_id = Some("MPC-001".to_string());
    assert_eq!(EventCard::detailed(&mpc).lines[0], ("ID", "MPC-001".to_string()));

    let unknown = EventCard::detailed(&SpaceWeatherEvent::default());
    assert_eq!(unknown.title, "UNKNOWN EVENT");
    assert_eq!(unknown.lines[0], ("ID", "unknown-0001-01-01T00:00:00".to_string()));
}
