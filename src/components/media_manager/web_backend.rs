// Browser implementation of the media element pair.

use std::time::Duration;

use gloo_timers::callback::Timeout;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Event, File, HtmlAudioElement, HtmlMediaElement, HtmlVideoElement, Url};

use super::{EventSink, AUDIO_ELEMENT_ID, VIDEO_ELEMENT_ID};
use crate::player::{MediaBackend, MediaEvent, MediaKind, PlayerError, SessionEvent, SessionId};

pub struct WebMediaBackend {
    audio: HtmlAudioElement,
    video: HtmlVideoElement,
    sink: EventSink,
}

impl WebMediaBackend {
    /// Pick up the rendered media elements, creating any that are missing.
    pub fn attach(sink: EventSink) -> Option<Self> {
        let audio: HtmlAudioElement = get_or_create_media_element("audio", AUDIO_ELEMENT_ID)?;
        let video: HtmlVideoElement = get_or_create_media_element("video", VIDEO_ELEMENT_ID)?;
        audio.set_hidden(true);
        video.set_hidden(true);
        Some(Self { audio, video, sink })
    }

    fn element(&self, kind: MediaKind) -> &HtmlMediaElement {
        match kind {
            MediaKind::Audio => self.audio.as_ref(),
            MediaKind::Video => self.video.as_ref(),
        }
    }
}

impl Drop for WebMediaBackend {
    fn drop(&mut self) {
        for kind in [MediaKind::Audio, MediaKind::Video] {
            let _ = self.element(kind).pause();
        }
    }
}

fn get_or_create_media_element<T: JsCast>(tag: &str, id: &str) -> Option<T> {
    let document = window()?.document()?;

    if let Some(existing) = document.get_element_by_id(id) {
        return existing.dyn_into::<T>().ok();
    }

    let element = document.create_element(tag).ok()?;
    element.set_id(id);
    element.set_attribute("preload", "metadata").ok()?;
    document.body()?.append_child(&element).ok()?;

    element.dyn_into::<T>().ok()
}

fn js_error_message(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    ["name", "message"]
        .iter()
        .filter_map(|key| js_sys::Reflect::get(err, &(*key).into()).ok())
        .filter_map(|value| value.as_string())
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "unknown error".to_string())
}

type Listener = Closure<dyn FnMut(Event)>;

/// The `ended`, `timeupdate` and `durationchange` listeners of one session.
/// Removed from the element when dropped.
struct ListenerSet {
    element: HtmlMediaElement,
    listeners: Vec<(&'static str, Listener)>,
}

impl ListenerSet {
    fn attach(element: &HtmlMediaElement, session: SessionId, sink: &EventSink) -> Self {
        let mut set = Self {
            element: element.clone(),
            listeners: Vec::with_capacity(3),
        };

        set.listen("ended", sink, session, |_| MediaEvent::Ended);
        set.listen("timeupdate", sink, session, |element| {
            MediaEvent::TimeUpdate(element.current_time())
        });
        set.listen("durationchange", sink, session, |element| {
            MediaEvent::DurationChange(element.duration())
        });
        set
    }

    fn listen(
        &mut self,
        name: &'static str,
        sink: &EventSink,
        session: SessionId,
        read: fn(&HtmlMediaElement) -> MediaEvent,
    ) {
        let element = self.element.clone();
        let sink = sink.clone();
        let callback = Closure::wrap(Box::new(move |_event: Event| {
            sink(SessionEvent::new(session, read(&element)));
        }) as Box<dyn FnMut(Event)>);

        if self
            .element
            .add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())
            .is_ok()
        {
            self.listeners.push((name, callback));
        } else {
            tracing::warn!(event = name, "failed to attach media listener");
        }
    }

    fn detach(&mut self) {
        for (name, callback) in self.listeners.drain(..) {
            let _ = self
                .element
                .remove_event_listener_with_callback(name, callback.as_ref().unchecked_ref());
        }
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.detach();
    }
}

/// A session's hold on an element: its listeners and the object URL.
pub struct WebBinding {
    element: HtmlMediaElement,
    url: String,
    listeners: ListenerSet,
}

impl Drop for WebBinding {
    fn drop(&mut self) {
        self.listeners.detach();
        let _ = self.element.remove_attribute("src");
        self.element.load();
        if let Err(err) = Url::revoke_object_url(&self.url) {
            tracing::debug!("failed to revoke object url: {}", js_error_message(&err));
        }
    }
}

impl MediaBackend for WebMediaBackend {
    type Source = File;
    type Binding = WebBinding;
    type Timer = Timeout;

    fn bind(
        &mut self,
        session: SessionId,
        kind: MediaKind,
        source: &File,
    ) -> Result<WebBinding, PlayerError> {
        let url = Url::create_object_url_with_blob(source)
            .map_err(|err| PlayerError::SourceUnavailable(js_error_message(&err)))?;

        let element = self.element(kind).clone();
        let listeners = ListenerSet::attach(&element, session, &self.sink);
        element.set_src(&url);

        Ok(WebBinding {
            element,
            url,
            listeners,
        })
    }

    fn set_visible(&mut self, kind: MediaKind, visible: bool) {
        self.element(kind).set_hidden(!visible);
    }

    fn play(&mut self, session: SessionId, kind: MediaKind) {
        let sink = self.sink.clone();
        match self.element(kind).play() {
            Ok(promise) => {
                wasm_bindgen_futures::spawn_local(async move {
                    let event = match wasm_bindgen_futures::JsFuture::from(promise).await {
                        Ok(_) => MediaEvent::Started,
                        Err(err) => MediaEvent::PlayRejected(js_error_message(&err)),
                    };
                    sink(SessionEvent::new(session, event));
                });
            }
            Err(err) => sink(SessionEvent::new(
                session,
                MediaEvent::PlayRejected(js_error_message(&err)),
            )),
        }
    }

    fn pause(&mut self, kind: MediaKind) {
        let _ = self.element(kind).pause();
    }

    fn position(&self, kind: MediaKind) -> f64 {
        self.element(kind).current_time()
    }

    fn seek(&mut self, kind: MediaKind, seconds: f64) {
        self.element(kind).set_current_time(seconds);
    }

    fn schedule(&mut self, delay: Duration, event: SessionEvent) -> Timeout {
        let sink = self.sink.clone();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, move || sink(event))
    }
}
