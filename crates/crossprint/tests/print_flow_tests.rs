//! End-to-end printing flows against the headless page

use crossprint::{
    send_print_signal, HostError, InitOptions, Lifecycle, MirrorOutcome, PrintHost, PrintStatus,
    Printer, PrinterBuilder, PrinterOptions, PrinterSettings, SurfaceManager, SurfaceOptions,
    PAGE_STYLE_ID, PRINT_SIGNAL_ID, SURFACE_ID,
};
use dom::{DomError, Document, Element, FontFace, Listener, ListenerId, Window};
use proptest::prelude::*;
use std::rc::Rc;

/// Host that refuses to mirror elements with selected ids
#[derive(Clone)]
struct FlakyHost {
    window: Window,
    blocked: Rc<Vec<String>>,
}

impl FlakyHost {
    fn new(window: &Window, blocked: &[&str]) -> Self {
        Self {
            window: window.clone(),
            blocked: Rc::new(blocked.iter().map(|id| id.to_string()).collect()),
        }
    }
}

impl PrintHost for FlakyHost {
    fn create_surface(&self) -> Result<Element, HostError> {
        self.window.create_surface()
    }

    fn attach_surface(&self, surface: &Element) -> Result<(), HostError> {
        self.window.attach_surface(surface)
    }

    fn locate_surface_by_id(&self, id: &str) -> Option<Element> {
        self.window.locate_surface_by_id(id)
    }

    fn enumerate_style_sources(&self) -> Vec<Element> {
        self.window.enumerate_style_sources()
    }

    fn enumerate_font_faces(&self) -> Option<Vec<FontFace>> {
        self.window.enumerate_font_faces()
    }

    fn mirror_node(&self, source: &Element, parent: &Element) -> Result<Element, HostError> {
        if let Some(id) = source.id().filter(|id| self.blocked.contains(id)) {
            return Err(HostError::Rejected(format!("{id} is cross-origin")));
        }
        self.window.mirror_node(source, parent)
    }

    fn dispatch_global_event(&self, name: &str) -> bool {
        self.window.dispatch_global_event(name)
    }

    fn subscribe_global_event(&self, name: &str, listener: Listener) -> ListenerId {
        self.window.subscribe_global_event(name, listener)
    }

    fn unsubscribe_global_event(&self, name: &str, id: ListenerId) -> bool {
        self.window.unsubscribe_global_event(name, id)
    }

    fn document_title(&self) -> String {
        self.window.document_title()
    }

    fn set_document_title(&self, title: &str) {
        self.window.set_document_title(title)
    }
}

fn styled_page() -> (Window, Element) {
    let window = Window::new();
    let document = window.document();
    document.set_title("Dashboard");
    for (id, css) in [("theme", "body{font:serif}"), ("vendor", "p{margin:0}")] {
        let style = document.create_element("style");
        style.set_id(id);
        style.set_text_content(css).unwrap();
        document.head().append_child(&style).unwrap();
    }
    let link = document.create_element("link");
    link.set_attribute("rel", "stylesheet");
    link.set_attribute("href", "/app.css");
    document.head().append_child(&link).unwrap();

    let content = document.create_element("div");
    content.set_id("nodeX");
    content.append_text("Quarterly numbers").unwrap();
    document.body().append_child(&content).unwrap();
    (window, content)
}

fn surface_doc(printer: &Printer<impl PrintHost + Clone + 'static>) -> Document {
    printer.surface_document().unwrap()
}

#[test]
fn test_report_scenario() {
    let (window, content) = styled_page();
    let mut builder = PrinterBuilder::new(window.clone())
        .content(content)
        .page_style("body{color:red}")
        .title("Report");
    let printer = builder.build().unwrap();
    let report = printer.init(InitOptions::copy_nothing());
    assert!(report.applied);
    assert!(!report.has_failures());

    assert_eq!(printer.print(), PrintStatus::Printed);

    let document = surface_doc(&printer);
    let copies = document.body().children();
    assert_eq!(copies.len(), 1);
    assert_eq!(copies[0].id().as_deref(), Some("nodeX"));
    assert_eq!(copies[0].text_content(), "Quarterly numbers");

    let page_style = document.get_element_by_id(PAGE_STYLE_ID).unwrap();
    assert_eq!(page_style.tag_name(), "style");
    assert_eq!(page_style.text_content(), "body{color:red}");

    assert_eq!(window.document().title(), "Dashboard");
    let requests = window.print_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].top_level_title, "Report");
}

#[test]
fn test_copy_flags_off_leave_style_and_font_areas_untouched() {
    let (window, content) = styled_page();
    window
        .document()
        .fonts()
        .unwrap()
        .add(FontFace::new("Mono", "local(Mono)"))
        .unwrap();
    let printer = Printer::new(window.clone(), PrinterOptions::default().with_content(content))
        .unwrap();
    let report = printer.init(InitOptions::default());
    assert!(report.styles.is_none());
    assert!(report.fonts.is_none());

    let document = surface_doc(&printer);
    assert_eq!(document.head().child_element_count(), 0);
    assert!(document.fonts().unwrap().is_empty());
}

#[test]
fn test_settings_copy_flags_apply_when_init_leaves_them_unset() {
    let (window, content) = styled_page();
    let settings = PrinterSettings {
        copy_styles: true,
        ..PrinterSettings::default()
    };
    let printer =
        Printer::new(window, PrinterOptions::new(settings).with_content(content)).unwrap();
    let report = printer.init(InitOptions::default());
    assert_eq!(report.styles, Some(Ok(MirrorOutcome::Complete)));

    let head = surface_doc(&printer).head();
    assert_eq!(head.elements_by_tag_name("style").len(), 2);
    assert_eq!(head.elements_by_tag_name("link").len(), 1);
}

#[test]
fn test_partial_style_failure_copies_the_rest() {
    let (window, content) = styled_page();
    let host = FlakyHost::new(&window, &["vendor"]);
    let printer = Printer::new(host, PrinterOptions::default().with_content(content)).unwrap();
    let report = printer.init(InitOptions::copy_all());
    assert!(report.has_failures());

    let Some(Ok(MirrorOutcome::Partial(items))) = &report.styles else {
        panic!("expected a partial style copy, got {:?}", report.styles);
    };
    let names: Vec<_> = items.iter().map(|item| item.item.as_str()).collect();
    assert_eq!(names, vec!["theme", "vendor", "link"]);
    assert!(items[0].is_success());
    assert!(matches!(items[1].error(), Some(HostError::Rejected(_))));
    assert!(items[2].is_success());

    let head = surface_doc(&printer).head();
    assert_eq!(head.child_element_count(), 2);
    assert!(printer.is_ready());
    assert_eq!(printer.print(), PrintStatus::Printed);
}

#[test]
fn test_css_connected_fonts_are_reported_not_fatal() {
    let (window, content) = styled_page();
    let fonts = window.document().fonts().unwrap();
    fonts.register_from_css(FontFace::new("Inter", "url(/inter.woff2)"));
    fonts.add(FontFace::new("Mono", "local(Mono)")).unwrap();

    let printer =
        Printer::new(window, PrinterOptions::default().with_content(content)).unwrap();
    let report = printer.init(InitOptions {
        copy_fonts: Some(true),
        ..InitOptions::default()
    });

    let outcome = report.fonts.unwrap().unwrap();
    let failed: Vec<_> = outcome.failures().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].item, "Inter");
    assert!(matches!(
        failed[0].error(),
        Some(HostError::Dom(DomError::InvalidModification(_)))
    ));
    assert!(surface_doc(&printer).fonts().unwrap().has_family("Mono"));
}

#[test]
fn test_signal_fans_out_to_every_printer() {
    let (window, content) = styled_page();
    let first = Printer::new(window.clone(), PrinterOptions::default().with_content(content.clone()))
        .unwrap();
    let second =
        Printer::new(window.clone(), PrinterOptions::default().with_content(content)).unwrap();
    first.init(InitOptions::default());
    second.init(InitOptions::default());
    assert_eq!(window.listener_count(PRINT_SIGNAL_ID), 2);

    assert!(send_print_signal(&window));
    assert_eq!(window.print_requests().len(), 2);
}

#[test]
fn test_removed_printer_ignores_everything() {
    let (window, content) = styled_page();
    let printer = Printer::new(window.clone(), PrinterOptions::default().with_content(content.clone()))
        .unwrap();
    printer.init(InitOptions::default());
    assert!(printer.remove());

    assert_eq!(printer.lifecycle(), Lifecycle::Removed);
    assert!(window.document().get_element_by_id(SURFACE_ID).is_none());
    assert_eq!(window.listener_count(PRINT_SIGNAL_ID), 0);

    assert!(!printer.remove());
    printer.reset();
    assert!(!printer.init(InitOptions::default()).applied);
    assert_eq!(printer.print(), PrintStatus::NotReady);
    assert!(!printer.set_title("Late"));
    assert!(printer.set_content(content).is_none());
    assert!(printer.surface_element().is_none());
    assert!(printer.surface_document().is_none());
    assert!(send_print_signal(&window));
    assert!(window.print_requests().is_empty());
}

#[test]
fn test_detached_surface_is_not_printed() {
    let (window, content) = styled_page();
    let printer = Printer::new(window.clone(), PrinterOptions::default().with_content(content))
        .unwrap();
    printer.init(InitOptions::default());
    printer.surface_element().unwrap().remove();

    assert_eq!(printer.print(), PrintStatus::SurfaceDetached);
    assert!(window.print_requests().is_empty());
}

#[test]
fn test_reuse_adopts_attached_surface() {
    let window = Window::new();
    let options = SurfaceOptions::default().with_reuse_existing(true);
    let first = SurfaceManager::new(window.clone(), &options).unwrap();
    let second = SurfaceManager::new(window.clone(), &options).unwrap();

    assert_eq!(first.element(), second.element());
    assert_eq!(window.document().elements_by_tag_name("iframe").len(), 1);

    let third = SurfaceManager::new(window.clone(), &SurfaceOptions::default()).unwrap();
    assert_ne!(first.element(), third.element());
    assert_eq!(window.document().elements_by_tag_name("iframe").len(), 2);
}

#[test]
fn test_reuse_ignores_non_surface_with_same_id() {
    let window = Window::new();
    let decoy = window.document().create_element("div");
    decoy.set_id(SURFACE_ID);
    window.document().body().append_child(&decoy).unwrap();

    let options = SurfaceOptions::default().with_reuse_existing(true);
    let surface = SurfaceManager::new(window, &options).unwrap();
    assert_ne!(surface.element(), &decoy);
    assert_eq!(surface.element().tag_name(), "iframe");
}

#[test]
fn test_content_mirror_failure_is_reported() {
    let (window, content) = styled_page();
    let host = FlakyHost::new(&window, &["nodeX"]);
    let surface = SurfaceManager::new(host, &SurfaceOptions::default()).unwrap();
    let outcome = surface.copy_content(&content).unwrap();
    assert_eq!(outcome.failure_count(), 1);
    assert_eq!(
        surface.content_document().unwrap().body().child_element_count(),
        0
    );
}

proptest! {
    #[test]
    fn prop_copy_content_never_accumulates(repeats in 1usize..8, text in "[a-z]{1,16}") {
        let window = Window::new();
        let node = window.document().create_element("section");
        node.append_text(&text).unwrap();
        let surface = SurfaceManager::new(window, &SurfaceOptions::default()).unwrap();

        for _ in 0..repeats {
            prop_assert_eq!(surface.copy_content(&node).unwrap(), MirrorOutcome::Complete);
        }
        let body = surface.content_document().unwrap().body();
        prop_assert_eq!(body.child_element_count(), 1);
        prop_assert_eq!(body.text_content(), text);
    }

    #[test]
    fn prop_host_title_survives_print(title in "[A-Za-z]{1,12}", fail in any::<bool>()) {
        let (window, content) = styled_page();
        if fail {
            window.set_print_handler(|_| Err(DomError::PrintFailed("spooler offline".to_string())));
        }
        let settings = PrinterSettings {
            title: Some(title),
            ..PrinterSettings::default()
        };
        let printer = Printer::new(window.clone(), PrinterOptions::new(settings).with_content(content))
            .unwrap();

        prop_assert_eq!(printer.print(), PrintStatus::NotReady);
        prop_assert_eq!(window.document().title(), "Dashboard");

        printer.init(InitOptions::default());
        let expected = if fail { PrintStatus::Failed } else { PrintStatus::Printed };
        prop_assert_eq!(printer.print(), expected);
        prop_assert_eq!(window.document().title(), "Dashboard");
    }
}
