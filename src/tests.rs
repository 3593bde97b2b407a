#[cfg(test)]
mod grid_tests {
    use crate::core::{Cell, Grid};

    #[test]
    fn test_grid_initially_dirty() {
        let grid = Grid::new(80, 24);
        assert!(grid.has_dirty_rows());
        assert!(grid.is_row_dirty(0));
    }

    #[test]
    fn test_set_marks_dirty() {
        let mut grid = Grid::new(80, 24);
        grid.clear_dirty();

        grid.set(5, 5, Cell::new('X')).unwrap();

        assert!(grid.is_row_dirty(5));
        assert!(!grid.is_row_dirty(0)); // Other rows still clean
    }

    #[test]
    fn test_set_clipped_drops_outside_cells() {
        let mut grid = Grid::new(4, 4);
        grid.clear_dirty();

        grid.set_clipped(9, 1, Cell::new('X'));
        assert!(!grid.has_dirty_rows());

        grid.set_clipped(3, 1, Cell::new('X'));
        assert_eq!(grid.get(3, 1).unwrap().character, 'X');
        assert!(grid.is_row_dirty(1));
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut grid = Grid::new(4, 4);
        assert!(grid.set(4, 0, Cell::new('X')).is_err());
        assert!(grid.get(0, 4).is_none());
    }

    #[test]
    fn test_restore_marks_only_changed_rows() {
        let mut grid = Grid::new(10, 5);
        let snapshot = grid.clone();
        grid.set(3, 2, Cell::new('o')).unwrap();
        grid.clear_dirty();

        grid.restore(&snapshot);

        assert_eq!(grid.dirty_rows().collect::<Vec<_>>(), vec![2]);
        assert_eq!(grid.get(3, 2).unwrap().character, ' ');
    }

    #[test]
    fn test_restore_unchanged_is_clean() {
        let mut grid = Grid::new(10, 5);
        let snapshot = grid.clone();
        grid.clear_dirty();

        grid.restore(&snapshot);

        assert!(!grid.has_dirty_rows());
    }

    #[test]
    fn test_put_str_clips_at_edge() {
        let mut grid = Grid::new(5, 1);
        let written = grid.put_str(2, 0, "hello", Default::default());
        assert_eq!(written, 3);
        assert_eq!(grid.row_text(0), "  hel");
    }
}

#[cfg(test)]
mod color_tests {
    use crate::core::Color;

    #[test]
    fn test_blend_extremes() {
        assert_eq!(Color::RED.blend(Color::WHITE, 1.0), Color::RED);
        assert_eq!(Color::RED.blend(Color::WHITE, 0.0), Color::WHITE);
    }

    #[test]
    fn test_blend_half() {
        let mixed = Color::BLACK.blend(Color::WHITE, 0.5);
        assert_eq!(mixed, Color::new(128, 128, 128));
    }

    #[test]
    fn test_blend_clamps_alpha() {
        assert_eq!(Color::BLUE.blend(Color::WHITE, 3.0), Color::BLUE);
        assert_eq!(Color::BLUE.blend(Color::WHITE, -1.0), Color::WHITE);
    }
}

#[cfg(test)]
mod style_tests {
    use crate::core::Color;
    use crate::plot::{COLOR_CYCLE, ItemStyle, LineStyle, MarkerStyle};

    fn parse(fmt: &str) -> ItemStyle {
        fmt.parse().unwrap()
    }

    #[test]
    fn test_marker_only() {
        let style = parse("o");
        assert_eq!(style.marker, Some(MarkerStyle::Circle));
        assert_eq!(style.line, None);
        assert_eq!(style.color, None);
    }

    #[test]
    fn test_line_only() {
        let style = parse("-");
        assert_eq!(style.marker, None);
        assert_eq!(style.line, Some(LineStyle::Solid));
    }

    #[test]
    fn test_color_and_dashes() {
        let style = parse("r--");
        assert_eq!(style.color, Some(Color::RED));
        assert_eq!(style.line, Some(LineStyle::Dashed));
        assert_eq!(style.marker, None);
    }

    #[test]
    fn test_marker_with_dash_dot() {
        let style = parse("o-.");
        assert_eq!(style.marker, Some(MarkerStyle::Circle));
        assert_eq!(style.line, Some(LineStyle::DashDot));
    }

    #[test]
    fn test_cycle_color_reference() {
        let style = parse("C1x");
        assert_eq!(style.color, Some(COLOR_CYCLE[1]));
        assert_eq!(style.marker, Some(MarkerStyle::Cross));
    }

    #[test]
    fn test_color_only_draws_line() {
        let style = parse("g");
        assert_eq!(style.line, Some(LineStyle::Solid));
        assert_eq!(style.marker, None);
    }

    #[test]
    fn test_invalid_formats() {
        assert!("oo".parse::<ItemStyle>().is_err());
        assert!("q".parse::<ItemStyle>().is_err());
        assert!("rg".parse::<ItemStyle>().is_err());
    }

    #[test]
    fn test_dash_patterns() {
        assert!((0..8).all(|i| LineStyle::Solid.is_on(i)));
        assert!(LineStyle::Dotted.is_on(0));
        assert!(!LineStyle::Dotted.is_on(1));
        assert!(!LineStyle::Dashed.is_on(2));
    }
}

#[cfg(test)]
mod options_tests {
    use crate::plot::{DEFAULT_XLIM, RendererOptions};

    #[test]
    fn test_ylim_defaults_to_xlim() {
        let options = RendererOptions::default().with_xlim([-1.0, 1.0]);
        assert_eq!(options.resolved_ylim(), [-1.0, 1.0]);

        let options = options.with_ylim([0.0, 5.0]);
        assert_eq!(options.resolved_ylim(), [0.0, 5.0]);
    }

    #[test]
    fn test_defaults_are_not_shared() {
        let mut a = RendererOptions::default();
        a.xlim[0] = -10.0;
        let b = RendererOptions::default();
        assert_eq!(b.xlim, DEFAULT_XLIM);
    }

    #[test]
    fn test_json_fills_defaults() {
        let options = RendererOptions::from_json_str(r#"{"title": "t", "tight": true}"#).unwrap();
        assert_eq!(options.title.as_deref(), Some("t"));
        assert!(options.tight);
        assert_eq!(options.xlim, DEFAULT_XLIM);
        assert_eq!(options.ylim, None);
        assert!(!options.enable_legend);
    }

    #[test]
    fn test_json_round_trip() {
        let options = RendererOptions::default()
            .with_title("Dots")
            .with_ylim([0.0, 2.0])
            .with_grid(true);
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(RendererOptions::from_json_str(&json).unwrap(), options);
    }

    #[test]
    fn test_bad_json() {
        assert!(RendererOptions::from_json_str(r#"{"xlim": "wide"}"#).is_err());
    }

    #[test]
    fn test_validate_limits() {
        assert!(RendererOptions::default().validate().is_ok());
        assert!(RendererOptions::default().with_xlim([1.0, 1.0]).validate().is_err());
        assert!(RendererOptions::default().with_ylim([2.0, 1.0]).validate().is_err());
        assert!(
            RendererOptions::default()
                .with_xlim([f64::NAN, 1.0])
                .validate()
                .is_err()
        );
        // span overflows to infinity
        assert!(
            RendererOptions::default()
                .with_xlim([-1e308, 1e308])
                .validate()
                .is_err()
        );
        // span too small to resolve at this magnitude
        assert!(
            RendererOptions::default()
                .with_xlim([1e17, 1e17 + 32.0])
                .validate()
                .is_err()
        );
        assert!(
            RendererOptions::default()
                .with_xlim([1e6, 1e6 + 1.0])
                .validate()
                .is_ok()
        );
    }
}

#[cfg(test)]
mod axes_tests {
    use crate::plot::axes::{
        Axes, CELL_ASPECT, fit_within, format_tick, nice_ticks, tight_figure_size,
    };
    use crate::plot::RendererOptions;

    #[test]
    fn test_nice_ticks_default_limits() {
        let (ticks, step) = nice_ticks([-1.5, 1.5], 5);
        assert_eq!(step, 0.5);
        assert_eq!(ticks, vec![-1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5]);
        assert_eq!(format_tick(ticks[0], step), "-1.5");
        assert_eq!(format_tick(ticks[3], step), "0.0");
    }

    #[test]
    fn test_nice_ticks_integer_step() {
        let (ticks, step) = nice_ticks([0.0, 100.0], 5);
        assert_eq!(step, 20.0);
        assert_eq!(ticks.len(), 6);
        assert_eq!(format_tick(40.0, step), "40");
    }

    #[test]
    fn test_nice_ticks_stay_bounded() {
        let (ticks, _) = nice_ticks([-1e308, 1e308], 5);
        assert!(ticks.len() <= 65);

        let (ticks, _) = nice_ticks([1e17, 1e17 + 32.0], 5);
        assert!(ticks.len() <= 65);
    }

    #[test]
    fn test_clip_segment_to_limits() {
        let axes = Axes::new(&RendererOptions::default().with_xlim([-1.0, 1.0]), 80, 40);

        let (a, b) = axes.clip_segment((0.0, 0.0), (1e12, 0.0)).unwrap();
        assert_eq!(a, (0.0, 0.0));
        assert!((b.0 - 1.0).abs() < 1e-9 && b.1 == 0.0);

        // opposite extremes do not overflow; the result stays inside the box
        let (a, b) = axes.clip_segment((-f64::MAX, 0.5), (f64::MAX, 0.5)).unwrap();
        assert!(a.0.abs() <= 1.0 && b.0.abs() <= 1.0);
        assert_eq!((a.1, b.1), (0.5, 0.5));

        assert!(axes.clip_segment((2.0, 0.0), (3.0, 5.0)).is_none());
        assert!(axes.clip_segment((-5.0, 2.0), (5.0, 2.0)).is_none());
    }

    #[test]
    fn test_equal_aspect_box() {
        let axes = Axes::new(&RendererOptions::default(), 80, 40);
        let plot = axes.plot_area();
        // a square data range needs twice as many columns as rows
        let diff = plot.width as f64 - CELL_ASPECT * plot.height as f64;
        assert!(diff.abs() <= 2.0, "plot area {:?}", plot);
    }

    #[test]
    fn test_to_cell_corners() {
        let options = RendererOptions::default().with_xlim([-1.0, 1.0]);
        let axes = Axes::new(&options, 60, 30);
        let plot = axes.plot_area();

        assert_eq!(axes.to_cell(-1.0, 1.0), Some((plot.x, plot.y)));
        assert_eq!(
            axes.to_cell(1.0, -1.0),
            Some((plot.right() - 1, plot.bottom() - 1))
        );
        assert_eq!(axes.to_cell(2.0, 0.0), None);
        assert_eq!(axes.to_cell(f64::NAN, 0.0), None);
    }

    #[test]
    fn test_tight_size_follows_data_ratio() {
        assert_eq!(tight_figure_size(80, 1.0, [-2.0, 2.0], [-1.0, 1.0]), (80, 20));
        assert_eq!(tight_figure_size(80, 1.0, [-1.0, 1.0], [-1.0, 1.0]), (80, 40));
    }

    #[test]
    fn test_fit_within_keeps_ratio() {
        assert_eq!(fit_within((80, 40), (40, 10)), (20, 10));
        assert_eq!(fit_within((20, 10), (40, 40)), (20, 10));
    }

    #[test]
    fn test_hidden_axis_paints_only_title() {
        let options = RendererOptions::default()
            .with_title("Hidden")
            .with_xlabel("x")
            .hide_axis(true);
        let axes = Axes::new(&options, 40, 20);
        let mut grid = crate::core::Grid::new(40, 20);
        axes.paint(&mut grid);

        let text = grid.to_text();
        assert!(text.contains("Hidden"));
        assert!(!text.contains('┌'));
        assert!(!text.contains("1.5"));
    }

    #[test]
    fn test_decorations() {
        let options = RendererOptions::default()
            .with_title("Plot")
            .with_xlabel("time")
            .with_ylabel("val")
            .with_grid(true);
        let axes = Axes::new(&options, 80, 40);
        let mut grid = crate::core::Grid::new(80, 40);
        axes.paint(&mut grid);

        let text = grid.to_text();
        assert!(text.contains("Plot"));
        assert!(text.contains("time"));
        assert!(text.contains('┌'));
        assert!(text.contains('┼'));
        assert!(text.contains("-1.5"));
        assert!(grid.get(0, 0).unwrap().character == ' ');
    }
}

#[cfg(test)]
mod renderer_tests {
    use crate::core::{Color, Grid};
    use crate::error::PlotError;
    use crate::plot::{
        CELL_ASPECT, COLOR_CYCLE, FramePhase, MarkerStyle, Renderer, RendererOptions,
        SETTLE_DELAY, SimpleRenderer,
    };
    use crate::surface::{HeadlessSurface, Surface};
    use std::time::Duration;

    fn renderer(options: RendererOptions) -> Renderer<HeadlessSurface> {
        Renderer::new(HeadlessSurface::new(80, 40), options).unwrap()
    }

    fn same_picture(a: &Grid, b: &Grid) -> bool {
        a.height() == b.height() && (0..a.height()).all(|y| a.row(y) == b.row(y))
    }

    #[test]
    fn test_single_frame_completes() {
        let mut r = renderer(RendererOptions::default().with_xlim([-1.0, 1.0]));
        r.register("a").unwrap();

        r.start_drawing();
        r.draw_item("a", &[0.0], &[0.0]).unwrap();
        r.end_drawing(Duration::ZERO).unwrap();

        assert_eq!(r.surface().frames_presented(), 1);
        let (cx, cy) = r.axes().to_cell(0.0, 0.0).unwrap();
        assert_eq!(r.canvas().get(cx, cy).unwrap().character, '●');
        assert!(same_picture(r.surface().front().unwrap(), r.canvas()));
    }

    #[test]
    fn test_unregistered_label_fails() {
        let mut r = renderer(RendererOptions::default());

        let err = r.draw_item("missing", &[0.0], &[0.0]).unwrap_err();

        assert!(matches!(&err, PlotError::NotRegistered(label) if label == "missing"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_registered_labels_never_fail() {
        let mut r = renderer(RendererOptions::default());
        for label in ["a", "b", "c"] {
            r.register(label).unwrap();
        }

        r.start_drawing();
        for label in ["a", "b", "c"] {
            assert!(r.draw_item(label, &[0.1, 0.2], &[0.3, 0.4]).is_ok());
        }
        r.end_drawing(Duration::ZERO).unwrap();
    }

    #[test]
    fn test_reregister_overwrites() {
        let mut r = renderer(RendererOptions::default());
        r.register("a").unwrap();
        r.register_item("a").marker("x").register().unwrap();

        assert_eq!(r.labels().count(), 1);
        assert_eq!(
            r.item("a").unwrap().style().marker,
            Some(MarkerStyle::Cross)
        );
    }

    #[test]
    fn test_length_mismatch() {
        let mut r = renderer(RendererOptions::default());
        r.register("a").unwrap();
        r.start_drawing();

        let err = r.draw_item("a", &[0.0, 1.0], &[0.0]).unwrap_err();
        assert!(matches!(err, PlotError::LengthMismatch { x_len: 2, y_len: 1, .. }));
    }

    #[test]
    fn test_invalid_limits_rejected() {
        let result = Renderer::new(
            HeadlessSurface::new(80, 40),
            RendererOptions::default().with_xlim([1.0, -1.0]),
        );
        assert!(matches!(result, Err(PlotError::InvalidLimits { axis: 'x', .. })));
    }

    #[test]
    fn test_invalid_style_rejected() {
        let mut r = renderer(RendererOptions::default());
        assert!(r.register_item("a").marker("zz").register().is_err());
        assert!(!r.is_registered("a"));
    }

    #[test]
    fn test_background_captured_after_show() {
        let r = renderer(RendererOptions::default().with_title("Bg"));
        let surface = r.surface();

        assert!(surface.is_shown());
        assert_eq!(surface.total_paused(), SETTLE_DELAY);
        assert!(same_picture(surface.front().unwrap(), r.background()));
        assert!(r.background().to_text().contains("Bg"));
    }

    #[test]
    fn test_previous_frame_is_erased() {
        let mut r = renderer(RendererOptions::default().with_xlim([-1.0, 1.0]));
        r.register("a").unwrap();

        r.start_drawing();
        r.draw_item("a", &[0.0], &[0.0]).unwrap();
        r.end_drawing(Duration::ZERO).unwrap();

        r.start_drawing();
        r.draw_item("a", &[0.5], &[0.5]).unwrap();
        r.end_drawing(Duration::ZERO).unwrap();

        let (ox, oy) = r.axes().to_cell(0.0, 0.0).unwrap();
        let (nx, ny) = r.axes().to_cell(0.5, 0.5).unwrap();
        assert_eq!(r.canvas().get(ox, oy), r.background().get(ox, oy));
        assert_eq!(r.canvas().get(nx, ny).unwrap().character, '●');
        assert!(same_picture(r.surface().front().unwrap(), r.canvas()));
    }

    #[test]
    fn test_blit_sends_only_changed_rows() {
        let mut r = renderer(RendererOptions::default().with_xlim([-1.0, 1.0]));
        r.register("a").unwrap();

        r.start_drawing();
        r.draw_item("a", &[0.0], &[0.0]).unwrap();
        r.end_drawing(Duration::ZERO).unwrap();
        assert_eq!(r.surface().rows_blitted(), 1);

        // same row again: restore dirties it, drawing dirties it, still one row
        r.start_drawing();
        r.draw_item("a", &[0.5], &[0.0]).unwrap();
        r.end_drawing(Duration::ZERO).unwrap();
        assert_eq!(r.surface().rows_blitted(), 2);
    }

    #[test]
    fn test_color_cycle_and_explicit_color() {
        let mut r = renderer(RendererOptions::default());
        r.register("first").unwrap();
        r.register_item("red").marker("ro").register().unwrap();
        r.register("second").unwrap();

        assert_eq!(r.item("first").unwrap().color(), COLOR_CYCLE[0]);
        assert_eq!(r.item("red").unwrap().color(), Color::RED);
        assert_eq!(r.item("second").unwrap().color(), COLOR_CYCLE[1]);
    }

    #[test]
    fn test_opacity_blends_toward_background() {
        let mut r = renderer(RendererOptions::default().with_xlim([-1.0, 1.0]));
        r.register_item("faded")
            .marker("ko")
            .opacity(0.5)
            .register()
            .unwrap();

        r.start_drawing();
        r.draw_item("faded", &[0.0], &[0.0]).unwrap();
        r.end_drawing(Duration::ZERO).unwrap();

        let (cx, cy) = r.axes().to_cell(0.0, 0.0).unwrap();
        assert_eq!(r.canvas().get(cx, cy).unwrap().style.fg, Color::new(128, 128, 128));
    }

    #[test]
    fn test_line_item_draws_segments() {
        let mut r = renderer(RendererOptions::default().with_xlim([-1.0, 1.0]));
        r.register_item("line").marker("-").register().unwrap();

        r.start_drawing();
        r.draw_item("line", &[-1.0, 1.0], &[0.0, 0.0]).unwrap();
        r.end_drawing(Duration::ZERO).unwrap();

        let plot = r.axes().plot_area();
        let (_, cy) = r.axes().to_cell(0.0, 0.0).unwrap();
        for x in plot.x..plot.right() {
            assert_eq!(r.canvas().get(x, cy).unwrap().character, '─');
        }
    }

    #[test]
    fn test_points_outside_limits_are_clipped() {
        let mut r = renderer(RendererOptions::default().with_xlim([-1.0, 1.0]));
        r.register("a").unwrap();

        r.start_drawing();
        r.draw_item("a", &[5.0, f64::NAN], &[5.0, 0.0]).unwrap();
        r.end_drawing(Duration::ZERO).unwrap();

        assert!(same_picture(r.canvas(), r.background()));
    }

    #[test]
    fn test_far_line_vertices_are_clipped() {
        let mut r = renderer(RendererOptions::default());
        r.register_item("l").marker("-").register().unwrap();
        let plot = r.axes().plot_area();
        let (_, cy) = r.axes().to_cell(0.0, 0.0).unwrap();

        for far in [1e12, f64::MAX] {
            r.start_drawing();
            r.draw_item("l", &[0.0, far], &[0.0, 0.0]).unwrap();
            r.end_drawing(Duration::ZERO).unwrap();

            let edge = r.canvas().get(plot.right() - 1, cy).unwrap();
            assert_eq!(edge.character, '─');
        }

        r.start_drawing();
        r.draw_item("l", &[-f64::MAX, f64::MAX], &[f64::MAX, f64::MAX]).unwrap();
        r.end_drawing(Duration::ZERO).unwrap();
        assert!(same_picture(r.canvas(), r.background()));
    }

    #[test]
    fn test_unresolvable_limits_rejected() {
        for xlim in [[-1e308, 1e308], [1e17, 1e17 + 32.0]] {
            let result = Renderer::new(
                HeadlessSurface::new(80, 40),
                RendererOptions::default().with_xlim(xlim),
            );
            assert!(matches!(result, Err(PlotError::InvalidLimits { axis: 'x', .. })));
        }
    }

    #[test]
    fn test_legend_drawn_when_enabled() {
        let mut r = renderer(RendererOptions::default().with_legend(true));
        r.register_item("dots").legend_label("Item 1").register().unwrap();
        r.register_item("lines")
            .marker("-")
            .legend_label("Item 2")
            .register()
            .unwrap();
        r.register("unlabelled").unwrap();

        r.start_drawing();
        r.draw_item("dots", &[0.0], &[0.0]).unwrap();
        r.end_drawing(Duration::ZERO).unwrap();

        let text = r.canvas().to_text();
        assert!(text.contains("Item 1"));
        assert!(text.contains("Item 2"));
        assert!(!r.background().to_text().contains("Item 1"));
    }

    #[test]
    fn test_legend_absent_when_disabled() {
        let mut r = renderer(RendererOptions::default());
        r.register_item("dots").legend_label("Item 1").register().unwrap();

        r.start_drawing();
        r.draw_item("dots", &[0.0], &[0.0]).unwrap();
        r.end_drawing(Duration::ZERO).unwrap();

        assert!(!r.canvas().to_text().contains("Item 1"));
    }

    #[test]
    fn test_end_drawing_delay_and_events() {
        let mut r = renderer(RendererOptions::default());
        r.register("a").unwrap();
        let flushes = r.surface().event_flushes();

        r.start_drawing();
        assert_eq!(r.phase(), FramePhase::Drawing);
        r.draw_item("a", &[0.0], &[0.0]).unwrap();
        r.end_drawing(Duration::from_millis(50)).unwrap();

        assert_eq!(r.phase(), FramePhase::Idle);
        assert_eq!(
            r.surface().total_paused(),
            SETTLE_DELAY + Duration::from_millis(50)
        );
        assert!(r.surface().event_flushes() > flushes);
    }

    #[test]
    fn test_out_of_order_calls_are_tolerated() {
        let mut r = renderer(RendererOptions::default());
        r.register("a").unwrap();

        assert!(r.draw_item("a", &[0.0], &[0.0]).is_ok());
        assert!(r.end_drawing(Duration::ZERO).is_ok());
    }

    #[test]
    fn test_tight_preserves_data_ratio() {
        let options = RendererOptions::default()
            .with_xlim([-2.0, 2.0])
            .with_ylim([-1.0, 1.0])
            .tight(true);
        let r = renderer(options);

        let (w, h) = r.surface().size();
        assert_eq!((w, h), (80, 20));
        let ratio = h as f64 * CELL_ASPECT / w as f64;
        assert!((ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_tight_scales_down_to_fit() {
        let surface = HeadlessSurface::new(80, 40).with_max_size(40, 10);
        let r = Renderer::new(surface, RendererOptions::default().tight(true)).unwrap();

        let (w, h) = r.surface().size();
        assert_eq!((w, h), (20, 10));
        assert_eq!(r.canvas().width(), 20);
    }

    #[test]
    fn test_simple_matches_manual_cycle() {
        let options = RendererOptions::default().with_title("Same");
        let mut simple =
            SimpleRenderer::with_defaults(HeadlessSurface::new(80, 40), options.clone()).unwrap();
        let mut manual = Renderer::new(HeadlessSurface::new(80, 40), options).unwrap();
        manual.register("default").unwrap();

        for i in 0..3 {
            let (x, y) = crate::demo::rose_points(i, 15, 0.01);
            simple.draw(&x, &y).unwrap();

            manual.start_drawing();
            manual.draw_item("default", &x, &y).unwrap();
            manual.end_drawing(Duration::ZERO).unwrap();
        }

        assert!(same_picture(simple.inner().canvas(), manual.canvas()));
        assert!(same_picture(
            simple.inner().surface().front().unwrap(),
            manual.surface().front().unwrap()
        ));
        assert_eq!(
            simple.inner().surface().frames_presented(),
            manual.surface().frames_presented()
        );
    }

    #[test]
    fn test_simple_forces_legend_off() {
        let options = RendererOptions::default().with_legend(true);
        let simple = SimpleRenderer::new(HeadlessSurface::new(80, 40), options, "x", 0.5).unwrap();

        let inner = simple.inner();
        assert!(!inner.legend_enabled());
        let item = inner.item(crate::plot::DEFAULT_LABEL).unwrap();
        assert_eq!(item.style().marker, Some(MarkerStyle::Cross));
        assert_eq!(item.alpha(), 0.5);
    }
}

#[cfg(test)]
mod demo_tests {
    use crate::demo::{self, DemoConfig, PROMPT, RendererMode, rose_points};
    use crate::error::PlotError;
    use crate::plot::RendererOptions;
    use crate::surface::HeadlessSurface;
    use std::cell::Cell;
    use std::io::Cursor;

    #[test]
    fn test_rose_points_start() {
        let (x, y) = rose_points(0, 15, 0.01);
        assert_eq!(x.len(), 15);
        assert_eq!(y.len(), 15);
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!(y[0].abs() < 1e-12);
    }

    #[test]
    fn test_rose_points_stay_in_unit_circle() {
        for frame in [0, 17, 499] {
            let (x, y) = rose_points(frame, 15, 0.01);
            for (a, b) in x.iter().zip(&y) {
                assert!(a * a + b * b <= 1.0 + 1e-9);
            }
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("normal".parse::<RendererMode>().unwrap(), RendererMode::Normal);
        assert_eq!("simple".parse::<RendererMode>().unwrap(), RendererMode::Simple);
        assert!(matches!(
            "Simple".parse::<RendererMode>(),
            Err(PlotError::InvalidChoice(_))
        ));
    }

    #[test]
    fn test_prompt_trims_input() {
        let mut input = Cursor::new(" simple \n");
        let mut output = Vec::new();

        let mode = demo::prompt_mode(&mut input, &mut output).unwrap();

        assert_eq!(mode, RendererMode::Simple);
        assert_eq!(String::from_utf8(output).unwrap(), PROMPT);
    }

    #[test]
    fn test_invalid_choice_opens_no_surface() {
        let mut input = Cursor::new("bogus\n");
        let mut output = Vec::new();
        let opened = Cell::new(false);

        let result = demo::run_interactive(
            None,
            &mut input,
            &mut output,
            RendererOptions::default(),
            &DemoConfig::default(),
            || {
                opened.set(true);
                Ok(HeadlessSurface::new(80, 40))
            },
        );

        assert!(matches!(result, Err(PlotError::InvalidChoice(ref s)) if s == "bogus"));
        assert!(!opened.get());
    }

    #[test]
    fn test_simple_demo_reports_fps() {
        let mut input = Cursor::new("simple\n");
        let mut output = Vec::new();

        let report = demo::run_interactive(
            None,
            &mut input,
            &mut output,
            RendererOptions::default(),
            &DemoConfig::default(),
            || Ok(HeadlessSurface::new(80, 40)),
        )
        .unwrap();

        assert_eq!(report.frames, 500);
        assert!(report.fps() > 0.0);
        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("Average FPS: "));
    }

    #[test]
    fn test_normal_demo_presents_every_frame() {
        let config = DemoConfig {
            frames: 20,
            ..DemoConfig::default()
        };

        let (report, surface) = demo::run(
            RendererMode::Normal,
            HeadlessSurface::new(80, 40),
            RendererOptions::default(),
            &config,
        )
        .unwrap();

        assert_eq!(report.frames, 20);
        assert_eq!(surface.frames_presented(), 20);
        let front = surface.front().unwrap().to_text();
        assert!(front.contains("Dots circling"));
        assert!(front.contains("Item 2"));
    }
}
