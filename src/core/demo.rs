//! Sample page wired into a `MemoryHost`
//!
//! Mirrors the live site: a menu with two section links, a call to action
//! jumping to the form, six project slides, six gallery tiles opening the
//! lightbox, the contact form and three sections.

use crate::core::MemoryHost;
use crate::types::{
    Capability, CarouselMarkup, ElementId, FieldKind, FieldMarkup, FormMarkup, GalleryItem,
    GalleryMarkup, LightboxMarkup, LightboxPayload, NavigationMarkup, PageMarkup,
};

pub const MENU_TOGGLE: ElementId = ElementId(1);
pub const MENU: ElementId = ElementId(2);
pub const NAV_LINKS: [ElementId; 2] = [ElementId(3), ElementId(4)];
/// "Pide presupuesto" button, anchored to the form
pub const CTA: ElementId = ElementId(5);

pub const TRACK: ElementId = ElementId(10);
pub const NEXT: ElementId = ElementId(11);
pub const PREV: ElementId = ElementId(12);
pub const SLIDE_COUNT: u32 = 6;

pub const GALLERY: ElementId = ElementId(30);
pub const GALLERY_ITEMS: [ElementId; 6] = [
    ElementId(31),
    ElementId(32),
    ElementId(33),
    ElementId(34),
    ElementId(35),
    ElementId(36),
];

pub const OVERLAY: ElementId = ElementId(40);
pub const PANEL: ElementId = ElementId(41);
pub const DISMISS: ElementId = ElementId(42);
pub const PANEL_LINK: ElementId = ElementId(43);

pub const FORM: ElementId = ElementId(50);
pub const SUBMIT: ElementId = ElementId(51);

pub const SECTIONS: [ElementId; 3] = [ElementId(60), ElementId(61), ElementId(62)];

const PROJECTS: [(&str, &str); 6] = [
    ("Ático Chamberí", "Reforma integral"),
    ("Cocina Malasaña", "Cocina"),
    ("Baño Retiro", "Baño"),
    ("Salón Salamanca", "Interiorismo"),
    ("Oficina Arganzuela", "Espacio de trabajo"),
    ("Terraza Lavapiés", "Exterior"),
];

/// Attach the sample page to `host` and describe it
pub fn sample_page(host: &mut MemoryHost) -> PageMarkup {
    host.tag(MENU_TOGGLE, Capability::MenuToggle);
    host.attach(MENU);
    for (link, section) in NAV_LINKS.into_iter().zip([SECTIONS[0], SECTIONS[2]]) {
        host.attach_under(link, MENU);
        host.tag(link, Capability::NavLink(Some(section)));
    }
    host.tag(CTA, Capability::Anchor(FORM));

    host.attach(TRACK);
    host.tag(NEXT, Capability::CarouselNext);
    host.tag(PREV, Capability::CarouselPrev);
    let slides: Vec<ElementId> = (0..SLIDE_COUNT).map(|i| ElementId(20 + i)).collect();
    for &slide in &slides {
        host.attach_under(slide, TRACK);
    }

    host.attach(GALLERY);
    let mut items = Vec::with_capacity(GALLERY_ITEMS.len());
    for (i, (&element, (title, kind))) in GALLERY_ITEMS.iter().zip(PROJECTS).enumerate() {
        let media = format!("img/proyecto-{}.webp", i + 1);
        host.attach_under(element, GALLERY);
        host.tag(
            element,
            Capability::LightboxTrigger(LightboxPayload::new(
                title,
                kind,
                media.clone(),
                format!("{} por el equipo de Emunah.", kind),
            )),
        );
        items.push(GalleryItem::new(element, media));
    }

    host.tag(OVERLAY, Capability::LightboxOverlay);
    host.attach_under(PANEL, OVERLAY);
    host.tag(PANEL, Capability::LightboxContent);
    host.attach_under(DISMISS, PANEL);
    host.tag(DISMISS, Capability::LightboxDismiss);
    host.attach_under(PANEL_LINK, PANEL);

    host.attach(FORM);
    host.attach_under(SUBMIT, FORM);

    for section in SECTIONS {
        host.attach(section);
    }

    PageMarkup {
        navigation: NavigationMarkup {
            toggle: Some(MENU_TOGGLE),
            menu: Some(MENU),
        },
        carousel: CarouselMarkup {
            track: Some(TRACK),
            next: Some(NEXT),
            prev: Some(PREV),
            slides,
        },
        lightbox: LightboxMarkup {
            overlay: Some(OVERLAY),
            dismiss: Some(DISMISS),
            focusables: vec![DISMISS, PANEL_LINK],
        },
        gallery: GalleryMarkup {
            container: Some(GALLERY),
            items,
        },
        form: FormMarkup {
            form: Some(FORM),
            submit: Some(SUBMIT),
            fields: vec![
                FieldMarkup::new("nombre", FieldKind::Required),
                FieldMarkup::new("email", FieldKind::Email),
                FieldMarkup::new("telefono", FieldKind::Tel),
                FieldMarkup::new("espacio", FieldKind::Text),
                FieldMarkup::new("proyecto", FieldKind::Required),
            ],
        },
        reveal_sections: SECTIONS.to_vec(),
    }
}
