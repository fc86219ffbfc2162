// Cross-cutting prompt fragments shared by every prompt that expects JSON back.
// Compliance is advisory: callers must still recover JSON from prose or fences.

/// Instruction block that asks the model for a bare JSON object.
pub const JSON_ONLY_SYSTEM: &str = "IMPORTANT: Respond with valid JSON only, nothing else. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
