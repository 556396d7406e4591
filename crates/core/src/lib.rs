pub mod shared {
    pub mod constants;
    pub mod frame;
    pub mod geometry;
    pub mod overlay_config;
}

pub mod detection {
    pub mod domain {
        pub mod face_detector;
        pub mod face_observation;
    }
    pub mod infrastructure;
}

pub mod overlay {
    pub mod domain {
        pub mod asset_source;
        pub mod coordinate_mapper;
        pub mod overlay_kind;
        pub mod overlay_layers;
        pub mod overlay_placement;
        pub mod overlay_sink;
        pub mod placement_engine;
        pub mod presence_tracker;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod frame_processor;
    pub mod frame_update;
    pub mod overlay_presenter;
    pub mod pipeline_executor;
    pub mod pipeline_logger;
    pub mod infrastructure;
}

pub mod video {
    pub mod domain {
        pub mod frame_source;
    }
    pub mod infrastructure;
}
