use contracts::printing::CostEstimate;
use leptos::prelude::*;

/// Everything the multi-page generation flow needs to remember between
/// pages: the prompt, the task ids, and the produced asset URLs.
#[derive(Clone, Copy)]
pub struct ModelContext {
    pub prompt: RwSignal<String>,
    pub art_style: RwSignal<String>,
    pub preview_task_id: RwSignal<Option<String>>,
    pub refine_task_id: RwSignal<Option<String>>,
    /// Raw CDN URL of the preview mesh
    pub model_url: RwSignal<Option<String>>,
    /// Raw CDN URL of the textured mesh, once refined
    pub refined_model_url: RwSignal<Option<String>>,
    pub cost_estimate: RwSignal<Option<CostEstimate>>,
}

impl ModelContext {
    pub fn new() -> Self {
        Self {
            prompt: RwSignal::new(String::new()),
            art_style: RwSignal::new("realistic".to_string()),
            preview_task_id: RwSignal::new(None),
            refine_task_id: RwSignal::new(None),
            model_url: RwSignal::new(None),
            refined_model_url: RwSignal::new(None),
            cost_estimate: RwSignal::new(None),
        }
    }

    /// Best available mesh URL, preferring the textured one
    pub fn display_url(&self) -> Option<String> {
        self.refined_model_url
            .get()
            .or_else(|| self.model_url.get())
    }

    pub fn reset_for_new_prompt(&self) {
        self.preview_task_id.set(None);
        self.refine_task_id.set(None);
        self.model_url.set(None);
        self.refined_model_url.set(None);
        self.cost_estimate.set(None);
    }
}

/// Hook to access the generation flow store
pub fn use_model() -> ModelContext {
    use_context::<ModelContext>().expect("ModelContext not found in component tree")
}
