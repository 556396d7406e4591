pub mod detection_trace;
pub mod replay_face_detector;
