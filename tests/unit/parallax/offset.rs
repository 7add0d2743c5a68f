use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn foreground_scenario() {
    let p = LayerPlacement::at(ScrollSample::new(1200.0, 1000.0).unwrap(), 0.5);
    assert!(approx(p.offset, 600.0));
    assert!(approx(p.primary_y, 600.0));
    assert!(approx(p.clone_y, -400.0));
}

#[test]
fn background_scenario() {
    let p = LayerPlacement::at(ScrollSample::new(4100.0, 800.0).unwrap(), 0.2);
    assert!(approx(p.offset, 20.0));
    assert!(approx(p.clone_y, -780.0));
}

#[test]
fn offset_stays_in_range() {
    for h in [1.0, 13.0, 599.5, 800.0, 1080.0] {
        for speed in [0.0, 0.2, 0.5, 1.0, 3.7] {
            let mut s = 0.0;
            while s < 50_000.0 {
                let o = wrapped_offset(s, speed, h);
                assert!((0.0..h).contains(&o), "s={s} speed={speed} h={h} o={o}");
                s += 37.3;
            }
        }
    }
}

#[test]
fn negative_scroll_wraps_into_range() {
    let o = wrapped_offset(-100.0, 0.5, 1000.0);
    assert!(approx(o, 950.0));
    assert_eq!(wrapped_offset(-1e-300, 1.0, 1000.0), 0.0);
}

#[test]
fn clone_is_exactly_one_viewport_above() {
    let h = 768.0;
    for i in 0..500 {
        let s = f64::from(i) * 11.0;
        let p = LayerPlacement::at(ScrollSample::new(s, h).unwrap(), 0.5);
        assert_eq!(p.primary_y - p.clone_y, h);
    }
}

#[test]
fn clone_takes_over_at_the_wrap() {
    let h = 1000.0;
    let speed = 0.5;
    // 1998 * 0.5 = 999 (just before the wrap), 2002 * 0.5 = 1001 -> 1.
    let before = LayerPlacement::at(ScrollSample::new(1998.0, h).unwrap(), speed);
    let after = LayerPlacement::at(ScrollSample::new(2002.0, h).unwrap(), speed);
    assert!(approx(before.primary_y, 999.0));
    assert!(approx(before.clone_y, -1.0));
    assert!(approx(after.primary_y, 1.0));
    assert!(approx(after.clone_y, -999.0));
}

#[test]
fn offset_is_monotonic_between_wraps() {
    let h = 900.0;
    let speed = 0.2;
    let mut prev = wrapped_offset(0.0, speed, h);
    for i in 1..12_000 {
        let o = wrapped_offset(f64::from(i), speed, h);
        if o > prev {
            prev = o;
            continue;
        }
        // Only a wrap may decrease the offset, and it lands back near the top.
        assert!(o < 1.0 && prev > h - 1.0, "prev={prev} o={o}");
        prev = o;
    }
}

#[test]
fn overflowing_product_pins_offset_at_zero() {
    assert_eq!(wrapped_offset(1e308, 2.0, 1000.0), 0.0);
    assert_eq!(wrapped_offset(-1e308, 2.0, 1000.0), 0.0);
    assert_eq!(wrapped_offset(f64::MAX, f64::MAX, 1.0), 0.0);

    let p = LayerPlacement::at(ScrollSample::new(1e308, 1000.0).unwrap(), 2.0);
    assert!((0.0..1000.0).contains(&p.offset), "offset={}", p.offset);
    assert_eq!(p.primary_y, 0.0);
    assert_eq!(p.clone_y, -1000.0);
}
