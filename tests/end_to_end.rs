use tern::*;

struct Gallery;

impl App for Gallery {
    type Body = Tuple<(
        WindowGroup<Text>,
        ModifiedContent<WindowGroup<Text>, EnvironmentModifier<ColorSchemeKey>>,
    )>;

    fn body(&self) -> Self::Body {
        tuple((
            WindowGroup::new("A", Text::new("first")),
            WindowGroup::new("B", Text::new("second")).preferred_color_scheme(ColorScheme::Dark),
        ))
    }
}

fn connection() -> SceneConnection {
    SceneConnection::new(Rect::from_size(1024., 768.))
}

#[test]
fn sibling_overrides_stay_scoped() {
    let connection = connection();
    let mut graph = AppGraph::new(Gallery, GraphConfig::default(), &HostDefaults::default());
    graph.connect(connection.clone());
    let outputs = graph.run().unwrap().clone();

    assert!(outputs.windows.is_empty(), "the root adds no windows of its own");
    assert_eq!(outputs.children.len(), 2);

    let inputs = SceneInputs::new(graph.environment().clone(), connection);
    let expected_a =
        lower_scene(GraphValue::new(WindowGroup::new("A", Text::new("first"))), inputs).unwrap();
    assert_eq!(outputs.children[0], expected_a);
    assert_eq!(outputs.children[0].windows[0].color_scheme, ColorScheme::Light);

    let b = &outputs.children[1].windows[0];
    assert_eq!(b.title, "B");
    assert_eq!(b.color_scheme, ColorScheme::Dark);
    match &b.content.views[0] {
        NativeView::Text { color, .. } => assert_eq!(*color, Color::rgb(0.9, 0.9, 0.9)),
        other => panic!("expected text, got {:?}", other),
    }
}

#[test]
fn runs_are_pure() {
    let mut graph = AppGraph::new(Gallery, GraphConfig::default(), &HostDefaults::default());
    graph.connect(connection());
    let first = graph.run().unwrap().clone();
    let second = graph.run().unwrap().clone();
    assert_eq!(first, second);
    assert_eq!(graph.passes(), 2);
}

#[test]
fn host_defaults_reach_the_leaves() {
    let defaults = HostDefaults {
        locale: Some(Locale::new("de_DE")),
        color_scheme: Some(ColorScheme::Dark),
        ..HostDefaults::default()
    };
    let mut graph = AppGraph::new(Gallery, GraphConfig::default(), &defaults);
    graph.connect(connection());
    let outputs = graph.run().unwrap();

    let windows = outputs.all_windows();
    assert!(windows.iter().all(|w| w.color_scheme == ColorScheme::Dark));
    match &windows[0].content.views[0] {
        NativeView::Text { locale, .. } => assert_eq!(locale.identifier(), "de_DE"),
        other => panic!("expected text, got {:?}", other),
    }
}

/// An application whose body contains itself.
struct Recursive;

struct Again;

impl Scene for Again {
    type Body = Again;

    fn body(&self) -> Again {
        Again
    }
}

impl App for Recursive {
    type Body = Again;

    fn body(&self) -> Again {
        Again
    }
}

#[test]
fn cyclic_apps_fail_without_outputs() {
    let config = GraphConfig::default().with_max_expansion_depth(32);
    let mut graph = AppGraph::new(Recursive, config, &HostDefaults::default());
    graph.connect(connection());

    match graph.run() {
        Err(GraphError::Lowering(LowerError::CyclicComposition { limit, chain })) => {
            assert_eq!(limit, 32);
            assert_eq!(chain.len(), 33);
            assert!(chain[0].contains("RootScene"));
            assert!(chain[1..].iter().all(|kind| kind.ends_with("Again")));
        }
        other => panic!("expected a cyclic composition, got {:?}", other.map(|_| ())),
    }
    assert!(!graph.is_running());
    assert_eq!(graph.passes(), 0);
}

#[test]
fn commands_and_settings() {
    struct Editor;

    impl App for Editor {
        type Body = Tuple<(
            ModifiedContent<
                ModifiedContent<WindowGroup<Text>, CommandsModifier<CommandMenu>>,
                WindowStyleModifier,
            >,
            Settings<Fill>,
        )>;

        fn body(&self) -> Self::Body {
            tuple((
                WindowGroup::new("Editor", Text::new("untitled"))
                    .commands(CommandMenu::new("File"))
                    .window_style(WindowStyle::HiddenTitleBar),
                Settings::new(Fill(Color::WHITE)),
            ))
        }
    }

    let mut graph = AppGraph::new(Editor, GraphConfig::default(), &HostDefaults::default());
    graph.connect(connection());
    let outputs = graph.run().unwrap();

    let windows = outputs.all_windows();
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0].style, WindowStyle::HiddenTitleBar);
    assert_eq!(windows[1].role, SceneRole::Settings);
    assert_eq!(windows[1].style, WindowStyle::Automatic);
    let menus: Vec<_> = outputs.all_menus().iter().map(|m| m.title.clone()).collect();
    assert_eq!(menus, vec!["File".to_string()]);
}
